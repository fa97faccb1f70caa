//! Member directories backed by memory or a YAML file

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use crate::application::errors::DirectoryError;
use crate::domain::entities::Member;
use crate::domain::traits::MemberDirectory;

/// In-memory member directory
#[derive(Debug, Default)]
pub struct StaticDirectory {
    members: RwLock<Vec<Member>>,
}

impl StaticDirectory {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// Load members from a YAML sequence
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let members: Vec<Member> = serde_yaml::from_str(&content)
            .map_err(|e| DirectoryError::Parse(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Loaded {} members from {}", members.len(), path.display());
        Ok(Self::new(members))
    }

    /// Add or replace a member
    pub fn upsert(&self, member: Member) {
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        match members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => members.push(member),
        }
    }

    pub fn len(&self) -> usize {
        self.members.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemberDirectory for StaticDirectory {
    fn members(&self) -> Vec<Member> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
