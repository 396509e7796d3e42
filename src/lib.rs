#![deny(missing_docs)]
//! A read-only auditing tool for chat transcripts kept in a Redis key-value store.
//!
//! A chat service stores every conversation as a Redis list of messages, under a key of the
//! form `<namespace>:conversations:<id>:messages`. This crate scans a store for those keys and
//! prints the messages of each conversation, grouped by conversation id, so an operator can
//! inspect transcripts for debugging or compliance review. The store is never written to.
//!
//! ## Audit Run
//! An audit run moves through the following steps, and any failure ends it:
//!
//! - resolve a [`Config`] from environment variables
//! - connect to the store and check the connection with a `PING`
//! - `SCAN` for every key matching `<namespace>:conversations:*:messages`
//! - for each key as it is found: `LRANGE` its full list and print it
//!
//! Output is streamed, a conversation is printed as soon as its key is visited rather than
//! after the scan completes. The order is whatever order the store's scan returns.
//!
//! ## Output Format
//! Every conversation is written to STDOUT as a block:
//!
//! ```text
//! Conversation: 42
//!
//! hi
//! there
//! --------------------
//! ```
//!
//! ## Stores
//! The audit runs against anything implementing [`ConversationStore`]. [`RedisStore`] is the
//! real thing, [`MemoryStore`] keeps lists in memory and follows Redis' scan and glob
//! semantics closely enough to exercise the audit without a server.
//!
//! ## Errors
//! All failures are an [`AuditError`]. Each variant carries the one line diagnostic shown to
//! the operator and a distinct process exit code.
//!
//! [`ConversationStore`]: ./engine/trait.ConversationStore.html
//! [`MemoryStore`]: ./engine/struct.MemoryStore.html

pub use audit::{audit, run, AuditSummary};
pub use client::RedisStore;
pub use config::Config;
pub use conversation::{conversation_id, messages_pattern, Conversation};
pub use engine::{ConversationStore, MemoryStore};
pub use error::{AuditError, Result};

mod audit;
mod client;
mod config;
mod conversation;
pub mod engine;
mod error;
mod transcript;
