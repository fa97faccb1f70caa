//! ModHelper cog
//!
//! `find <name> [score] [results]` fuzzy-searches guild members by display
//! name and username.

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::services::{MemberFinder, MemberMatch};
use crate::cogs::trait_def::Cog;
use crate::domain::entities::{Command, Reply};

pub const COG_NAME: &str = "ModHelper";

pub struct ModHelperCog {
    finder: Arc<MemberFinder>,
    min_score: u8,
    results: usize,
}

impl ModHelperCog {
    pub fn new(finder: Arc<MemberFinder>, min_score: u8, results: usize) -> Self {
        tracing::info!("{} v({}) initialized!", COG_NAME, env!("CARGO_PKG_VERSION"));
        Self {
            finder,
            min_score,
            results,
        }
    }
}

/// One reply block per match, or a single "no matches" reply
pub fn render_matches(query: &str, min_score: u8, matches: &[MemberMatch]) -> Vec<Reply> {
    if matches.is_empty() {
        return vec![Reply::text(format!(
            "No matches found for '{}' with the minimum score of {}.",
            query, min_score
        ))];
    }

    matches
        .iter()
        .map(|m| {
            Reply::text(format!(
                "### {} ({}) - {}%\n{}",
                m.member.display_name, m.member.username, m.score, m.member.id
            ))
        })
        .collect()
}

fn parse_arg<T: std::str::FromStr>(
    value: Option<&str>,
    default: T,
    what: &str,
) -> Result<T, CommandError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| {
                CommandError::InvalidArgs(format!("{} must be a number, got '{}'", what, raw))
            }),
    }
}

impl Cog for ModHelperCog {
    fn name(&self) -> &str {
        COG_NAME
    }

    fn description(&self) -> &str {
        "Moderation helpers"
    }

    fn commands(&self) -> Vec<Command> {
        let finder = Arc::clone(&self.finder);
        let (default_score, default_results) = (self.min_score, self.results);

        vec![Command::new("find")
            .with_description("Find a user by username using fuzzy matching")
            .with_usage("find <name> [score] [results]")
            .with_handler(move |inv| {
                let query = inv.arg(0).ok_or_else(|| {
                    CommandError::InvalidArgs("Usage: find <name> [score] [results]".to_string())
                })?;
                let min_score: u8 = parse_arg(inv.arg(1), default_score, "score")?;
                let results: usize = parse_arg(inv.arg(2), default_results, "results")?;

                if min_score > 100 {
                    return Err(CommandError::InvalidArgs(
                        "score must be between 0 and 100".to_string(),
                    ));
                }
                if results == 0 {
                    return Err(CommandError::InvalidArgs("results must be at least 1".to_string()));
                }

                let matches = finder.find(query, min_score, results);
                Ok(render_matches(query, min_score, &matches))
            })]
    }
}
