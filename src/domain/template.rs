//! Message templates with `{placeholder}` tokens

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

/// Placeholder for the member running the action
pub const INVOKER: &str = "invoker_member";
/// Placeholder for the member the action is aimed at
pub const TARGET: &str = "target_member";
/// Placeholder for the owner(s) asked to consent on a target's behalf
pub const OWNER: &str = "owner";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Substitute known placeholders. Unknown ones are left as written.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
