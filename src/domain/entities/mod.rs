//! Domain entities - Core business objects with no external dependencies

pub mod action;
pub mod command;
pub mod member;
pub mod reply;

pub use action::{Action, Consent, Denial};
pub use command::{Command, CommandRegistry, Invocation};
pub use member::Member;
pub use reply::{Embed, Reply};
