//! ruff-cogs - roleplay actions and moderation helpers for chat bots
//!
//! - `domain`: actions, members, commands and the traits the host provides
//! - `application`: the action catalog and member search
//! - `infrastructure`: config, member directories, fuzzy ranking, adapters
//! - `cogs`: the Roleplay and ModHelper cogs plus their manager

pub mod application;
pub mod cogs;
pub mod domain;
pub mod infrastructure;
