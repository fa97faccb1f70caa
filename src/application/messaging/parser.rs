//! Message parser - Parses raw text into command invocations

use crate::domain::entities::{Invocation, Member};

/// Parses incoming text into [`Invocation`]s
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message. Returns `None` for anything that isn't a command.
    pub fn parse(&self, text: &str, invoker: Member) -> Option<Invocation> {
        let text = text.trim();
        let cmd_text = text.strip_prefix(self.command_prefix.as_str())?;

        let mut parts = split_args(cmd_text).into_iter();
        let name = parts.next().filter(|n| !n.is_empty())?;

        Some(Invocation::new(name, parts.collect(), invoker))
    }
}

/// Split on whitespace, keeping double-quoted runs together
fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for c in text.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    args.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoker() -> Member {
        Member::new(1, "anna1")
    }

    #[test]
    fn test_parse_command() {
        let parser = MessageParser::new("!");
        let inv = parser.parse("!find ann 60 3", invoker()).unwrap();
        assert_eq!(inv.name, "find");
        assert_eq!(inv.args, vec!["ann", "60", "3"]);
    }

    #[test]
    fn test_parse_quoted_argument() {
        let parser = MessageParser::new("!");
        let inv = parser.parse("!hug \"Big Bo\"", invoker()).unwrap();
        assert_eq!(inv.args, vec!["Big Bo"]);
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        let parser = MessageParser::new("!");
        assert!(parser.parse("hello there", invoker()).is_none());
        assert!(parser.parse("!", invoker()).is_none());
    }
}
