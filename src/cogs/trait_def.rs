//! Cog trait definitions

use std::collections::HashMap;
use serde::Serialize;

use crate::domain::entities::Command;

/// Core cog trait that all cogs must implement
pub trait Cog: Send + Sync {
    /// Unique identifier for the cog
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Commands this cog exposes. Called again after every reload.
    fn commands(&self) -> Vec<Command>;

    /// Optional: Re-read any data the cog was built from
    fn reload(&self) -> Result<String, String> {
        Ok(format!("{} has nothing to reload", self.name()))
    }

    /// Optional: Cleanup resources when cog is unloaded
    fn cleanup(&self) {}

    /// Optional: Get cog metadata
    fn metadata(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Cog information for listing
#[derive(Debug, Clone, Serialize)]
pub struct CogInfo {
    pub name: String,
    pub description: String,
    pub commands: Vec<String>,
    pub metadata: HashMap<String, String>,
}
