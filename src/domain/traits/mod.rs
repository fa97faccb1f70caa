//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod directory;
pub mod ranker;

pub use bot::{Bot, BotInfo};
pub use directory::MemberDirectory;
pub use ranker::{Ranked, Ranker};
