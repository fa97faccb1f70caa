use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a guild member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Member {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Members who consent on this member's behalf
    #[serde(default)]
    pub owners: Vec<u64>,
}

impl Member {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id,
            display_name: username.clone(),
            username,
            roles: Vec::new(),
            owners: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owners.push(owner_id);
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Label used for fuzzy searching: "display name (username)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.username)
    }

    /// Whether `query` names this member by id, username or display name
    pub fn is_named(&self, query: &str) -> bool {
        let query = query.trim_start_matches('@');
        self.id.to_string() == query
            || self.username.eq_ignore_ascii_case(query)
            || self.display_name.eq_ignore_ascii_case(query)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
