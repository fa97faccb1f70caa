use crate::domain::entities::Member;

/// Guild member directory
pub trait MemberDirectory: Send + Sync {
    /// All members of the guild
    fn members(&self) -> Vec<Member>;

    /// Member with the given id
    fn member(&self, id: u64) -> Option<Member> {
        self.members().into_iter().find(|m| m.id == id)
    }

    /// Member named by id, username or display name
    fn lookup(&self, query: &str) -> Option<Member> {
        self.members().into_iter().find(|m| m.is_named(query))
    }
}
