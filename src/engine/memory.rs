use std::collections::BTreeMap;

use glob::Pattern;
use tracing::trace;

use super::ConversationStore;
use crate::{AuditError, Result};

// number of keys examined by one scan page unless told otherwise
const DEFAULT_PAGE_SIZE: usize = 10;

/// An in-memory [`ConversationStore`] holding lists of strings.
///
/// Keys are kept in a `BTreeMap` so scans visit them in a stable (sorted) order. Like Redis,
/// a scan page first takes `page_size` keys from the cursor position and only then filters them
/// by the pattern, so a page may come back empty while the scan is still in progress.
///
/// Patterns are matched with [`glob::Pattern`]: `*`, `?` and `[...]` classes behave as they do
/// in Redis, a class is negated with `[!...]` and special characters are quoted as `[*]`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    // maps keys to their list contents
    lists: BTreeMap<String, Vec<String>>,

    // number of keys examined per scan page
    page_size: usize,
}

impl MemoryStore {
    /// creates an empty store
    pub fn new() -> Self {
        MemoryStore {
            lists: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// sets how many keys each scan page examines, at least one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// appends `message` to the tail of the list at `key`, creating the list if needed
    pub fn push(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.lists.entry(key.into()).or_default().push(message.into());
    }

    /// replaces the list at `key` with `messages`
    pub fn insert<I, S>(&mut self, key: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(key.into(), messages.into_iter().map(Into::into).collect());
    }

    /// the number of keys in the store
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// returns `true` if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl ConversationStore for MemoryStore {
    fn ping(&mut self) -> Result<()> {
        Ok(())
    }

    fn scan_page(&mut self, cursor: u64, pattern: &str) -> Result<(u64, Vec<String>)> {
        let glob = Pattern::new(pattern).map_err(|source| AuditError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let start = cursor as usize;
        let end = start.saturating_add(self.page_size);
        let keys: Vec<String> = self
            .lists
            .keys()
            .skip(start)
            .take(self.page_size)
            .filter(|key| glob.matches(key))
            .cloned()
            .collect();

        let next = if end >= self.lists.len() { 0 } else { end as u64 };
        trace!(cursor, next, found = keys.len(), "scanned page");
        Ok((next, keys))
    }

    fn messages(&mut self, key: &str) -> Result<Vec<String>> {
        Ok(self.lists.get(key).cloned().unwrap_or_default())
    }
}
