/// separator between the segments of a conversation key
pub const SEPARATOR: char = ':';

/// the number of segments a well formed key has: `<namespace>:conversations:<id>:messages`
const KEY_SEGMENTS: usize = 4;

// position of the conversation id within the key
const ID_SEGMENT: usize = 2;

/// builds the glob pattern that matches the message list of every conversation in `namespace`.
/// A `namespace` of `*` matches conversations of any namespace
pub fn messages_pattern(namespace: &str) -> String {
    format!("{ns}{sep}conversations{sep}*{sep}messages", ns = namespace, sep = SEPARATOR)
}

/// extracts the conversation id from a storage `key`.
///
/// The id is the third `:` delimited segment of the key. Keys with fewer than four segments
/// don't follow the naming scheme, so the whole key is used as the id instead.
pub fn conversation_id(key: &str) -> &str {
    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if segments.len() >= KEY_SEGMENTS {
        segments[ID_SEGMENT]
    } else {
        key
    }
}

/// returns `true` if `key` doubles the separator (`a::conversations::1::messages`).
/// Such keys are still read positionally by [`conversation_id`], which then yields an empty or
/// literal segment rather than the id
pub fn has_doubled_separator(key: &str) -> bool {
    key.contains("::")
}

/// The messages of a single conversation, in the order they were stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// the conversation id taken from the storage key
    pub id: String,
    /// the raw stored chat turns
    pub messages: Vec<String>,
}

impl Conversation {
    /// builds a conversation from the storage `key` it was read from and its `messages`
    pub fn from_key(key: &str, messages: Vec<String>) -> Self {
        Conversation {
            id: conversation_id(key).to_string(),
            messages,
        }
    }
}
