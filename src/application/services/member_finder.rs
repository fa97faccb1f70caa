use std::sync::Arc;

use crate::domain::entities::Member;
use crate::domain::traits::{MemberDirectory, Ranker};

/// Default minimum similarity for a match
pub const DEFAULT_MIN_SCORE: u8 = 70;
/// Default number of matches requested from the ranker
pub const DEFAULT_RESULTS: usize = 5;

/// A member that matched a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMatch {
    pub member: Member,
    pub score: u8,
}

/// Fuzzy search over guild members by display name and username
pub struct MemberFinder {
    directory: Arc<dyn MemberDirectory>,
    ranker: Arc<dyn Ranker>,
}

impl MemberFinder {
    pub fn new(directory: Arc<dyn MemberDirectory>, ranker: Arc<dyn Ranker>) -> Self {
        Self { directory, ranker }
    }

    /// Best `limit` members for `query` scoring at least `min_score`.
    ///
    /// Members are ranked by their "display name (username)" label but are
    /// returned by position, never parsed back out of the label.
    pub fn find(&self, query: &str, min_score: u8, limit: usize) -> Vec<MemberMatch> {
        let members = self.directory.members();
        let labels: Vec<String> = members.iter().map(Member::label).collect();

        let matches: Vec<MemberMatch> = self
            .ranker
            .rank(query, &labels, limit)
            .into_iter()
            .filter(|ranked| ranked.score >= min_score)
            .filter_map(|ranked| {
                members.get(ranked.index).map(|member| MemberMatch {
                    member: member.clone(),
                    score: ranked.score,
                })
            })
            .collect();

        tracing::debug!(
            "find '{}' (min score {}, limit {}): {} of {} members matched",
            query,
            min_score,
            limit,
            matches.len(),
            members.len()
        );
        matches
    }
}
