//! Fuzzy ranking for member search
//!
//! Scores follow the usual weighted-ratio heuristic: a plain edit-distance
//! ratio, token sort and token set ratios, and a partial (substring) ratio
//! when one string is much longer than the other. All scores are 0-100.

use crate::domain::traits::{Ranked, Ranker};

/// Weighted ratio scorer backed by `strsim`
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl WeightedRatio {
    pub fn new() -> Self {
        Self
    }

    /// Similarity of two strings, 0 to 100
    pub fn score(&self, a: &str, b: &str) -> u8 {
        let a = normalize(a);
        let b = normalize(b);
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
        let len_ratio = len_a.max(len_b) / len_a.min(len_b);

        let unbase_scale = 0.95;
        let base = ratio(&a, &b);

        let best = if len_ratio < 1.5 {
            let token_sort = token_sort_ratio(&a, &b, false) * unbase_scale;
            let token_set = token_set_ratio(&a, &b, false) * unbase_scale;
            base.max(token_sort).max(token_set)
        } else {
            let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
            let partial = partial_ratio(&a, &b) * partial_scale;
            let token_sort = token_sort_ratio(&a, &b, true) * unbase_scale * partial_scale;
            let token_set = token_set_ratio(&a, &b, true) * unbase_scale * partial_scale;
            base.max(partial).max(token_sort).max(token_set)
        };

        best.round().clamp(0.0, 100.0) as u8
    }
}

impl Ranker for WeightedRatio {
    fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<Ranked> {
        let mut ranked: Vec<Ranked> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| Ranked {
                index,
                score: self.score(query, candidate),
            })
            .collect();

        // stable, so equal scores keep candidate order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }
}

/// Lowercase, replace anything that isn't alphanumeric with a space, trim
fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against every same-length window of the longer
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long: Vec<char> = long.chars().collect();
    (0..=long.len() - short_len)
        .map(|start| {
            let window: String = long[start..start + short_len].iter().collect();
            ratio(short, &window)
        })
        .fold(0.0, f64::max)
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

fn pick(a: &str, b: &str, partial: bool) -> f64 {
    if partial {
        partial_ratio(a, b)
    } else {
        ratio(a, b)
    }
}

fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let mut ta: Vec<&str> = a.split_whitespace().collect();
    let mut tb: Vec<&str> = b.split_whitespace().collect();
    ta.sort_unstable();
    tb.sort_unstable();
    pick(&ta.join(" "), &tb.join(" "), partial)
}

fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let ta = sorted_tokens(a);
    let tb = sorted_tokens(b);

    let common: Vec<&str> = ta.iter().filter(|t| tb.contains(t)).copied().collect();
    let only_a: Vec<&str> = ta.iter().filter(|t| !tb.contains(t)).copied().collect();
    let only_b: Vec<&str> = tb.iter().filter(|t| !ta.contains(t)).copied().collect();

    let base = common.join(" ");
    let combined_a = format!("{} {}", base, only_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", base, only_b.join(" ")).trim().to_string();

    pick(&base, &combined_a, partial)
        .max(pick(&base, &combined_b, partial))
        .max(pick(&combined_a, &combined_b, partial))
}
