//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Cog error: {0}")]
    Cog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while loading action definitions
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error trying to parse {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Bad action data in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Failed to read action directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ActionError {
    /// Path of the file (or directory) the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ActionError::Io { path, .. }
            | ActionError::Decode { path, .. }
            | ActionError::Schema { path, .. }
            | ActionError::Directory { path, .. } => path,
        }
    }
}

/// Why a decoded action document was rejected
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("expected a mapping at the top level")]
    NotMapping,

    #[error("{0}")]
    Fields(#[from] serde_yaml::Error),

    #[error("bad \"{gate}\" data: {source}")]
    Gate {
        gate: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Member directory errors
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
