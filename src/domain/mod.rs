//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Action, Member, Command, Reply)
//! - Traits: Abstractions for infrastructure (Bot, MemberDirectory, Ranker)
//! - Templates: Placeholder substitution for action messages

pub mod entities;
pub mod template;
pub mod traits;
