//! Invocation dispatch: routes a named call with text arguments to a
//! registry operation.
//!
//! Hosts deliver every call as a function name plus string arguments. The
//! arguments are validated and converted here, before any operation runs.

use std::fmt;
use std::str::FromStr;

use asset_ledger_core::{parse_estimated_value, Asset};
use asset_ledger_store::WorldState;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::registry::AssetRegistry;

/// The functions exported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    InitLedger,
    CreateAsset,
    ReadAsset,
    UpdateAsset,
    DeleteAsset,
    AssetExists,
    TransferAsset,
    GetAllAssets,
}

impl Function {
    /// All exported functions.
    pub const ALL: [Function; 8] = [
        Function::InitLedger,
        Function::CreateAsset,
        Function::ReadAsset,
        Function::UpdateAsset,
        Function::DeleteAsset,
        Function::AssetExists,
        Function::TransferAsset,
        Function::GetAllAssets,
    ];

    /// The exported name.
    pub fn name(&self) -> &'static str {
        match self {
            Function::InitLedger => "InitLedger",
            Function::CreateAsset => "CreateAsset",
            Function::ReadAsset => "ReadAsset",
            Function::UpdateAsset => "UpdateAsset",
            Function::DeleteAsset => "DeleteAsset",
            Function::AssetExists => "AssetExists",
            Function::TransferAsset => "TransferAsset",
            Function::GetAllAssets => "GetAllAssets",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Function::InitLedger | Function::GetAllAssets => 0,
            Function::ReadAsset | Function::DeleteAsset | Function::AssetExists => 1,
            Function::TransferAsset => 2,
            Function::UpdateAsset => 3,
            Function::CreateAsset => 7,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Function::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| RegistryError::UnknownFunction(s.to_string()))
    }
}

/// One external call: a function name and its text arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation.
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `{"function": ..., "args": [...]}` payload.
    pub fn from_json(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| RegistryError::InvalidArgument(format!("malformed invocation: {}", e)))
    }

    /// Resolve the function and check the argument count.
    fn resolve(&self) -> Result<Function> {
        let function: Function = self.function.parse()?;
        if self.args.len() != function.arity() {
            return Err(RegistryError::InvalidArgument(format!(
                "{} takes {} arguments, got {}",
                function,
                function.arity(),
                self.args.len()
            )));
        }
        Ok(function)
    }
}

impl AssetRegistry {
    /// Execute one invocation against `ctx`, returning the response bytes.
    ///
    /// Responses: record text for CreateAsset/ReadAsset, the previous value
    /// for UpdateAsset/TransferAsset, `true`/`false` for AssetExists, the
    /// JSON array for GetAllAssets, and nothing for InitLedger/DeleteAsset.
    pub async fn invoke<S: WorldState + ?Sized>(
        &self,
        ctx: &S,
        invocation: &Invocation,
    ) -> Result<Vec<u8>> {
        let function = invocation.resolve()?;
        let args = &invocation.args;
        tracing::debug!(function = %function, "invoking");

        let response = match function {
            Function::InitLedger => {
                self.init_ledger(ctx).await?;
                String::new()
            }
            Function::CreateAsset => {
                let estimated_value = parse_estimated_value(&args[6])?;
                let asset = Asset::new(
                    args[0].as_str(),
                    args[1].as_str(),
                    args[2].as_str(),
                    args[3].as_str(),
                    args[4].as_str(),
                    args[5].as_str(),
                    0,
                )
                .with_estimated_value(estimated_value);
                self.create_asset(ctx, asset).await?
            }
            Function::ReadAsset => self.read_asset(ctx, &args[0]).await?,
            Function::UpdateAsset => {
                let new_estimated_value = parse_estimated_value(&args[2])?;
                self.update_asset(ctx, &args[0], &args[1], new_estimated_value)
                    .await?
            }
            Function::DeleteAsset => {
                self.delete_asset(ctx, &args[0]).await?;
                String::new()
            }
            Function::AssetExists => self.asset_exists(ctx, &args[0]).await?.to_string(),
            Function::TransferAsset => self.transfer_asset(ctx, &args[0], &args[1]).await?,
            Function::GetAllAssets => self.get_all_assets(ctx).await?,
        };

        Ok(response.into_bytes())
    }
}
