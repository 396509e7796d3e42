use std::io::Write;

use crate::conversation::Conversation;
use crate::Result;

/// the line that closes every conversation block
pub const SEPARATOR_LINE: &str = "--------------------";

/// writes one conversation block to `out` and flushes it:
///
/// ```text
/// Conversation: <id>
///
/// <message 1>
/// <message 2>
/// --------------------
/// ```
///
/// Messages are written exactly as stored, one per line.
pub fn write_conversation<W: Write>(out: &mut W, conversation: &Conversation) -> Result<()> {
    writeln!(out, "Conversation: {}", conversation.id)?;
    writeln!(out)?;
    for message in &conversation.messages {
        writeln!(out, "{}", message)?;
    }
    writeln!(out, "{}", SEPARATOR_LINE)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(conversation: &Conversation) -> String {
        let mut out = Vec::new();
        write_conversation(&mut out, conversation).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn block_layout() {
        let conv = Conversation {
            id: "42".to_string(),
            messages: vec!["hi".to_string(), "there".to_string()],
        };
        assert_eq!(render(&conv), "Conversation: 42\n\nhi\nthere\n--------------------\n");
    }

    #[test]
    fn empty_conversation_still_gets_a_separator() {
        let conv = Conversation { id: "x".to_string(), messages: vec![] };
        assert_eq!(render(&conv), "Conversation: x\n\n--------------------\n");
    }

    #[test]
    fn messages_are_not_escaped() {
        let conv = Conversation {
            id: "1".to_string(),
            messages: vec!["Q: line one\nline two".to_string(), "\t<b>&</b>".to_string()],
        };
        assert_eq!(
            render(&conv),
            "Conversation: 1\n\nQ: line one\nline two\n\t<b>&</b>\n--------------------\n"
        );
    }

    #[test]
    fn separator_is_twenty_dashes() {
        assert_eq!(SEPARATOR_LINE.len(), 20);
        assert!(SEPARATOR_LINE.chars().all(|c| c == '-'));
    }
}
