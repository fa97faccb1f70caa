//! Application services - Business logic orchestration

pub mod action_catalog;
pub mod member_finder;

pub use action_catalog::{ActionCatalog, ActionLoader, SharedCatalog};
pub use member_finder::{MemberFinder, MemberMatch};
