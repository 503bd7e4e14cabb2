//! Lazy, paged enumeration of world state.

use std::collections::VecDeque;

use asset_ledger_core::decode;
use asset_ledger_store::{KeyRange, StateEntry, WorldState};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// One element of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListEntry {
    /// A stored value that decoded as JSON.
    Record(Value),
    /// A stored value that did not; its raw text, lossily decoded as UTF-8.
    Opaque(String),
}

impl ListEntry {
    /// Decode a stored value, degrading to raw text instead of failing.
    pub fn from_stored(key: &str, value: &[u8]) -> Self {
        match decode::<Value>(value) {
            Ok(record) => ListEntry::Record(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not JSON, listing raw text");
                ListEntry::Opaque(String::from_utf8_lossy(value).into_owned())
            }
        }
    }

    /// The decoded record, if any.
    pub fn as_record(&self) -> Option<&Value> {
        match self {
            ListEntry::Record(v) => Some(v),
            ListEntry::Opaque(_) => None,
        }
    }
}

/// Cursor over a key range, fetching one page at a time.
///
/// Only the current page is held in memory. Each refill resumes strictly
/// after the last key returned.
pub struct AssetCursor<'a, S: WorldState + ?Sized> {
    ctx: &'a S,
    range: KeyRange,
    page_size: usize,
    buffer: VecDeque<StateEntry>,
    exhausted: bool,
}

impl<'a, S: WorldState + ?Sized> AssetCursor<'a, S> {
    pub(crate) fn new(ctx: &'a S, range: KeyRange, page_size: usize) -> Self {
        Self {
            ctx,
            range,
            page_size: page_size.max(1),
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Next `(key, entry)` in key order, or `None` when the range is done.
    pub async fn next_entry(&mut self) -> Result<Option<(String, ListEntry)>> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fill().await?;
        }

        Ok(self.buffer.pop_front().map(|entry| {
            let decoded = ListEntry::from_stored(&entry.key, &entry.value);
            (entry.key, decoded)
        }))
    }

    /// Drain the remaining entries.
    pub async fn collect_entries(mut self) -> Result<Vec<ListEntry>> {
        let mut entries = Vec::new();
        while let Some((_, entry)) = self.next_entry().await? {
            entries.push(entry);
        }
        Ok(entries)
    }

    async fn fill(&mut self) -> Result<()> {
        let page = self
            .ctx
            .get_state_by_range(&self.range, self.page_size)
            .await?;

        if page.len() < self.page_size {
            self.exhausted = true;
        }
        if let Some(last) = page.last() {
            self.range = self.range.after(&last.key);
        }

        tracing::debug!(fetched = page.len(), exhausted = self.exhausted, "fetched state page");
        self.buffer.extend(page);
        Ok(())
    }
}
