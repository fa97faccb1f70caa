/// A candidate picked by a [`Ranker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked {
    /// Position of the candidate in the input slice
    pub index: usize,
    /// Similarity, 0 to 100
    pub score: u8,
}

/// Fuzzy string ranking
pub trait Ranker: Send + Sync {
    /// Best `limit` candidates for `query`, highest score first
    fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<Ranked>;
}
