//! Cog manager - handles cog lifecycle and command dispatch

use crate::application::errors::CommandError;
use crate::cogs::trait_def::{Cog, CogInfo};
use crate::domain::entities::{CommandRegistry, Invocation, Reply};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Commands the manager answers itself. Cogs can't claim these names.
pub const BUILTIN_COMMANDS: [&str; 2] = ["help", "reload"];

fn is_builtin(name: &str) -> bool {
    BUILTIN_COMMANDS.iter().any(|b| b.eq_ignore_ascii_case(name))
}

/// Manages all cogs for the bot
pub struct CogManager {
    cogs: Vec<Arc<dyn Cog>>,
    registry: CommandRegistry,
}

impl CogManager {
    pub fn new() -> Self {
        Self {
            cogs: Vec::new(),
            registry: CommandRegistry::new(),
        }
    }

    /// Register a cog and its commands
    pub fn register<C: Cog + 'static>(&mut self, cog: C) -> Result<(), String> {
        let name = cog.name().to_string();

        if self.has_cog(&name) {
            return Err(format!("Cog '{}' already registered", name));
        }

        info!("Registering cog: {}", name);
        let cog: Arc<dyn Cog> = Arc::new(cog);
        self.add_commands(&cog);
        self.cogs.push(cog);
        Ok(())
    }

    /// Unregister a cog
    pub fn unregister(&mut self, name: &str) -> Result<(), String> {
        let Some(pos) = self.cogs.iter().position(|c| c.name() == name) else {
            return Err(format!("Cog '{}' not found", name));
        };

        let cog = self.cogs.remove(pos);
        cog.cleanup();
        self.refresh();
        info!("Unregistered cog: {}", name);
        Ok(())
    }

    /// Rebuild the command registry from every registered cog
    pub fn refresh(&mut self) {
        self.registry.clear();
        let cogs = self.cogs.clone();
        for cog in &cogs {
            self.add_commands(cog);
        }
    }

    fn add_commands(&mut self, cog: &Arc<dyn Cog>) {
        for mut command in cog.commands() {
            if is_builtin(&command.name) {
                error!(
                    "Command '{}' from cog '{}' is a built-in name, skipped",
                    command.name,
                    cog.name()
                );
                continue;
            }

            let conflicts = self.registry.conflicts(&command);
            let taken = self.registry.get(&command.name).is_some()
                || conflicts.iter().any(|key| key == &command.name);
            if taken {
                error!(
                    "Command '{}' from cog '{}' is already registered, skipped",
                    command.name,
                    cog.name()
                );
                continue;
            }

            command.aliases.retain(|alias| {
                let taken = is_builtin(alias) || conflicts.contains(alias);
                if taken {
                    warn!("Alias '{}' of '{}' is already taken, dropped", alias, command.name);
                }
                !taken
            });
            self.registry.register(command.with_category(cog.name()));
        }
    }

    /// Reload every cog, then rebuild the command registry
    pub fn reload(&mut self) -> Vec<Reply> {
        let replies = self
            .cogs
            .iter()
            .map(|cog| match cog.reload() {
                Ok(msg) => Reply::text(msg),
                Err(e) => {
                    warn!("Cog '{}' reload failed: {}", cog.name(), e);
                    Reply::text(format!("{} reload failed: {}", cog.name(), e))
                }
            })
            .collect();
        self.refresh();
        replies
    }

    /// Run a command, including the `help` and `reload` built-ins
    pub fn handle(&mut self, invocation: &Invocation) -> Result<Vec<Reply>, CommandError> {
        match invocation.name.to_lowercase().as_str() {
            "help" => Ok(vec![Reply::text(self.help(invocation.arg(0)))]),
            "reload" => Ok(self.reload()),
            _ => self.dispatch(invocation),
        }
    }

    /// Run a registered command
    pub fn dispatch(&self, invocation: &Invocation) -> Result<Vec<Reply>, CommandError> {
        let command = self
            .registry
            .find(&invocation.name)
            .ok_or_else(|| CommandError::NotFound(invocation.name.clone()))?;
        command.run(invocation)
    }

    /// Help for one command, or a listing of all commands grouped by cog
    pub fn help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.registry.find(name) {
                let description = cmd.description.as_deref().unwrap_or("No description");
                let mut help = format!("{} - {}", cmd.name, description);
                if !cmd.aliases.is_empty() {
                    help.push_str(&format!("\nAliases: {}", cmd.aliases.join(", ")));
                }
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command {} not found", name);
        }

        let mut help = String::new();
        for cog in self.list_cogs() {
            help.push_str(&format!("{}:\n", cog.name));
            for name in cog.commands {
                let description = self
                    .registry
                    .get(&name)
                    .and_then(|c| c.description.clone())
                    .unwrap_or_default();
                help.push_str(&format!("  {} - {}\n", name, description));
            }
        }
        help
    }

    /// List all registered cogs
    pub fn list_cogs(&self) -> Vec<CogInfo> {
        self.cogs
            .iter()
            .map(|cog| {
                let mut commands: Vec<String> = self
                    .registry
                    .all()
                    .filter(|c| c.category.as_deref() == Some(cog.name()))
                    .map(|c| c.name.clone())
                    .collect();
                commands.sort();
                CogInfo {
                    name: cog.name().to_string(),
                    description: cog.description().to_string(),
                    commands,
                    metadata: cog.metadata(),
                }
            })
            .collect()
    }

    /// Check if a cog exists
    pub fn has_cog(&self, name: &str) -> bool {
        self.cogs.iter().any(|c| c.name() == name)
    }

    pub fn command_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for CogManager {
    fn default() -> Self {
        Self::new()
    }
}
