//! This module provides the [`ConversationStore`] trait, the narrow view of a key-value store
//! that an audit run needs, and an in-memory implementation of it.
//! The Redis backed implementation lives in [`RedisStore`].
//!
//! [`RedisStore`]: ../struct.RedisStore.html
use crate::Result;

/// A trait for the read-only operations an audit performs against a key-value store
pub trait ConversationStore {
    /// checks that the store is reachable and accepts our credentials
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Authentication` if the credentials were rejected, else
    /// `AuditError::Connection`.
    fn ping(&mut self) -> Result<()>;

    /// returns one page of keys matching the glob `pattern`, starting at `cursor`, along with
    /// the cursor of the next page. A returned cursor of `0` means the scan is complete.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Iteration` if the page could not be read.
    fn scan_page(&mut self, cursor: u64, pattern: &str) -> Result<(u64, Vec<String>)>;

    /// returns every element of the list stored at `key`, first to last.
    ///
    /// A missing key is an empty list.
    fn messages(&mut self, key: &str) -> Result<Vec<String>>;
}

mod memory;

pub use self::memory::MemoryStore;
