//! Cogs for ruff-cogs
//!
//! A cog bundles related commands and is registered with the host as a unit.

pub mod manager;
pub mod modhelper;
pub mod roleplay;
pub mod trait_def;

pub use manager::CogManager;
pub use modhelper::ModHelperCog;
pub use roleplay::RoleplayCog;
pub use trait_def::{Cog, CogInfo};
