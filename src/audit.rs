use std::io::{self, Write};

use tracing::{debug, info, instrument, warn};

use crate::conversation::{has_doubled_separator, Conversation};
use crate::engine::ConversationStore;
use crate::transcript::write_conversation;
use crate::{Config, RedisStore, Result};

/// Totals of a completed audit run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuditSummary {
    /// number of conversation blocks written
    pub conversations: usize,
    /// number of messages written across all conversations
    pub messages: usize,
}

/// connects to the store described by `config` and prints every conversation in its namespace
/// to STDOUT. The connection is dropped before returning
pub fn audit(config: &Config) -> Result<AuditSummary> {
    let mut store = RedisStore::connect(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut store, &config.pattern(), &mut out)
}

/// scans `store` for keys matching `pattern` and writes each conversation to `out` as soon as
/// its key is visited.
///
/// Conversations appear in the order the store's scan returns them; nothing is sorted or
/// deduplicated. The first failure ends the run, blocks written before it stay written.
#[instrument(skip(store, out))]
pub fn run<S, W>(store: &mut S, pattern: &str, out: &mut W) -> Result<AuditSummary>
where
    S: ConversationStore,
    W: Write,
{
    let mut summary = AuditSummary::default();
    let mut cursor = 0;
    let mut warned_separator = false;

    loop {
        let (next, keys) = store.scan_page(cursor, pattern).map_err(|e| {
            warn!(cursor, "scan failed");
            e
        })?;
        debug!(cursor, next, keys = keys.len(), "scan page");

        for key in keys {
            if !warned_separator && has_doubled_separator(&key) {
                warn!(%key, "key separates its segments with '::', conversation ids are read from ':' segments");
                warned_separator = true;
            }
            let messages = store.messages(&key)?;
            let conversation = Conversation::from_key(&key, messages);
            debug!(%key, id = %conversation.id, messages = conversation.messages.len(), "conversation");

            write_conversation(out, &conversation)?;
            summary.conversations += 1;
            summary.messages += conversation.messages.len();
        }

        cursor = next;
        if cursor == 0 {
            break;
        }
    }

    info!(conversations = summary.conversations, messages = summary.messages, "audit complete");
    Ok(summary)
}
