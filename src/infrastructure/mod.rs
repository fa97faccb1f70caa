//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Directory: Guild member sources
//! - Fuzzy: Similarity ranking for member search
//! - Adapters: Chat host integrations

pub mod config;
pub mod directory;
pub mod fuzzy;
pub mod adapters;
