use std::collections::HashMap;

use super::{Member, Reply};
use crate::application::errors::CommandError;

/// A parsed command invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
    pub invoker: Member,
}

impl Invocation {
    pub fn new(name: impl Into<String>, args: Vec<String>, invoker: Member) -> Self {
        Self {
            name: name.into(),
            args,
            invoker,
        }
    }

    /// Argument at `index`, if given
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Command handler function type
pub type CommandHandler =
    Box<dyn Fn(&Invocation) -> Result<Vec<Reply>, CommandError> + Send + Sync>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    /// Cog that registered the command
    pub category: Option<String>,
    pub handler: Option<CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            category: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Invocation) -> Result<Vec<Reply>, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        let input_lower = input.to_lowercase();
        self.name.to_lowercase() == input_lower ||
            self.aliases.iter().any(|a| a.to_lowercase() == input_lower)
    }

    pub fn run(&self, invocation: &Invocation) -> Result<Vec<Reply>, CommandError> {
        match &self.handler {
            Some(handler) => handler(invocation),
            None => Ok(vec![Reply::text(format!("Command {} not implemented", self.name))]),
        }
    }
}

/// Command registry for managing available commands
///
/// Every lowercased name and alias resolves to exactly one command. The first
/// command to claim a key keeps it.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    lookup: HashMap<String, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Returns the command it replaced, if any.
    ///
    /// Aliases already claimed by another command are not registered for
    /// this one.
    pub fn register(&mut self, command: Command) -> Option<Command> {
        let name = command.name.clone();
        let replaced = self.commands.remove(&name);
        if replaced.is_some() {
            self.lookup.retain(|_, owner| *owner != name);
        }

        for key in std::iter::once(&command.name).chain(&command.aliases) {
            self.lookup
                .entry(key.to_lowercase())
                .or_insert_with(|| name.clone());
        }
        self.commands.insert(name, command);
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Find by exact name first, then by case-insensitive name or alias
    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.get(input).or_else(|| {
            self.lookup
                .get(&input.to_lowercase())
                .and_then(|name| self.commands.get(name))
        })
    }

    /// Names and aliases of `command` that already resolve to a different command
    pub fn conflicts(&self, command: &Command) -> Vec<String> {
        std::iter::once(&command.name)
            .chain(&command.aliases)
            .filter(|key| {
                self.lookup
                    .get(&key.to_lowercase())
                    .is_some_and(|owner| owner != &command.name)
            })
            .cloned()
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.lookup.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoker() -> Member {
        Member::new(1, "anna1")
    }

    #[test]
    fn test_find_by_alias() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("hug").with_aliases(vec!["cuddle".to_string()]));
        assert_eq!(registry.find("Cuddle").map(|c| c.name.as_str()), Some("hug"));
        assert!(registry.find("wave").is_none());
    }

    #[test]
    fn test_run_without_handler() {
        let command = Command::new("noop");
        let replies = command.run(&Invocation::new("noop", vec![], invoker())).unwrap();
        assert_eq!(replies, vec![Reply::text("Command noop not implemented")]);
    }

    #[test]
    fn test_shared_alias_keeps_first_owner() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("salute").with_aliases(vec!["hi".to_string()]));
        let aliases = vec!["HI".to_string(), "yo".to_string()];
        registry.register(Command::new("wave").with_aliases(aliases));

        for _ in 0..20 {
            assert_eq!(registry.find("hi").map(|c| c.name.as_str()), Some("salute"));
        }
        assert_eq!(registry.find("yo").map(|c| c.name.as_str()), Some("wave"));
        assert_eq!(
            registry.conflicts(&Command::new("wave").with_aliases(vec!["hi".to_string()])),
            vec!["hi"]
        );
    }

    #[test]
    fn test_replacing_drops_stale_aliases() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("hug").with_aliases(vec!["cuddle".to_string()]));
        registry.register(Command::new("hug"));
        assert!(registry.find("cuddle").is_none());
        assert!(registry.find("HUG").is_some());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(Command::new("a")).is_none());
        assert!(registry.register(Command::new("a")).is_some());
        assert_eq!(registry.len(), 1);
    }
}
