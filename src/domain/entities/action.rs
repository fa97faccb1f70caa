//! Roleplay action records
//!
//! An action is described by one YAML file. The file name (without extension)
//! is the action name; everything else comes from the file's mapping.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::Member;
use crate::application::errors::SchemaError;
use crate::domain::template::{self, INVOKER, OWNER, TARGET};

/// Messages used when an action needs the target's agreement.
///
/// All four templates are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Consent {
    /// Shown to the target. Ex: "{target_member}, {invoker_member} wants to ___ you."
    pub active: String,
    /// Shown to the invoker while waiting. Ex: "{invoker_member}, waiting on {target_member}."
    pub passive: String,
    /// Shown to the target's owner(s).
    /// Ex: "{owner}, {invoker_member} wants to ___ {target_member}."
    pub owner_active: String,
    /// Companion message for the owner request.
    pub owner_passive: String,
}

/// Roles that block an action when the target has one of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    pub roles: Vec<String>,
    /// Ex: "{invoker_member} can't ___ {target_member} in their current state."
    pub message: String,
}

impl Denial {
    /// Whether the target holds any of the blocking roles
    pub fn blocks(&self, target: &Member) -> bool {
        self.roles.iter().any(|role| target.has_role(role))
    }
}

/// A roleplay action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub name: String,
    /// Present tense description. Uses `{invoker_member}` and `{target_member}`.
    pub description: String,
    /// Help text shown for the generated command
    pub help: String,
    pub aliases: Vec<String>,
    /// Members credited for the idea, shown in the footer
    pub credits: Option<Vec<String>>,
    /// Deliver images as spoilered attachments instead of embedding them
    pub spoiler: bool,
    pub images: Vec<String>,
    pub consent: Option<Consent>,
    pub denial: Option<Denial>,
}

/// A YAML scalar accepted where a string is expected.
/// Role ids are usually written as bare integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s.into()],
            OneOrMany::Many(v) => v.into_iter().map(String::from).collect(),
        }
    }
}

fn normalize(value: Option<OneOrMany>) -> Vec<String> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

/// File contents before normalization
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    /// Accepted but ignored, the file name wins
    #[serde(rename = "name")]
    _name: Option<serde::de::IgnoredAny>,
    description: Option<String>,
    help: Option<String>,
    aliases: Option<OneOrMany>,
    credits: Option<OneOrMany>,
    spoiler: Option<bool>,
    images: Option<OneOrMany>,
    consent: Option<serde_yaml::Value>,
    denial: Option<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDenial {
    message: String,
    roles: Option<OneOrMany>,
}

impl Action {
    /// Build an action from a decoded YAML document.
    ///
    /// Unknown top-level keys fail construction. A malformed `consent` or
    /// `denial` block is logged and dropped, unless `strict_gates` is set, in
    /// which case it fails construction too.
    pub fn from_yaml(
        name: impl Into<String>,
        value: serde_yaml::Value,
        strict_gates: bool,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        if !value.is_mapping() {
            return Err(SchemaError::NotMapping);
        }

        let raw: RawAction = serde_yaml::from_value(value)?;

        let description = raw
            .description
            .unwrap_or_else(|| format!("{{{INVOKER}}} is {name}ing {{{TARGET}}}."));
        let help = raw.help.unwrap_or_else(|| format!("{name}s a member."));

        let consent = match raw.consent {
            Some(value) if !value.is_null() => {
                match serde_yaml::from_value::<Consent>(value) {
                    Ok(consent) => Some(consent),
                    Err(source) if strict_gates => {
                        return Err(SchemaError::Gate { gate: "consent", source })
                    }
                    Err(e) => {
                        tracing::error!("Bad \"Consent\" data for action '{}': {}", name, e);
                        None
                    }
                }
            }
            _ => None,
        };

        let denial = match raw.denial {
            Some(value) if !value.is_null() => match serde_yaml::from_value::<RawDenial>(value) {
                Ok(denial) => Some(Denial {
                    roles: normalize(denial.roles),
                    message: denial.message,
                }),
                Err(source) if strict_gates => {
                    return Err(SchemaError::Gate { gate: "denial", source })
                }
                Err(e) => {
                    tracing::error!("Bad \"Denial\" data for action '{}': {}", name, e);
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            description,
            help,
            aliases: normalize(raw.aliases),
            credits: raw.credits.map(OneOrMany::into_vec),
            spoiler: raw.spoiler.unwrap_or(false),
            images: normalize(raw.images),
            consent,
            denial,
            name,
        })
    }

    /// Whether `input` names this action or one of its aliases
    pub fn matches(&self, input: &str) -> bool {
        self.name.eq_ignore_ascii_case(input)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(input))
    }

    /// The action description with both members filled in
    pub fn describe(&self, invoker: &Member, target: &Member) -> String {
        template::render(
            &self.description,
            &[(INVOKER, invoker.display_name.as_str()), (TARGET, target.display_name.as_str())],
        )
    }

    /// The denial message if the target holds a blocking role
    pub fn denied(&self, invoker: &Member, target: &Member) -> Option<String> {
        let denial = self.denial.as_ref()?;
        if !denial.blocks(target) {
            return None;
        }
        Some(template::render(
            &denial.message,
            &[(INVOKER, invoker.display_name.as_str()), (TARGET, target.display_name.as_str())],
        ))
    }

    /// Footer text crediting whoever came up with the action
    pub fn footer(&self) -> Option<String> {
        match &self.credits {
            Some(credits) if !credits.is_empty() => {
                Some(format!("Credits: {}", credits.join(", ")))
            }
            _ => None,
        }
    }

    /// One of the action's images, chosen at random
    pub fn pick_image(&self) -> Option<&str> {
        self.images
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

impl Consent {
    /// Render the (active, passive) pair asking the target directly
    pub fn ask_target(&self, invoker: &Member, target: &Member) -> (String, String) {
        let values = [
            (INVOKER, invoker.display_name.as_str()),
            (TARGET, target.display_name.as_str()),
        ];
        (
            template::render(&self.active, &values),
            template::render(&self.passive, &values),
        )
    }

    /// Render the (active, passive) pair asking the target's owners
    pub fn ask_owners(
        &self,
        invoker: &Member,
        target: &Member,
        owners: &[Member],
    ) -> (String, String) {
        let owner_names = owners
            .iter()
            .map(|o| o.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let values = [
            (INVOKER, invoker.display_name.as_str()),
            (TARGET, target.display_name.as_str()),
            (OWNER, owner_names.as_str()),
        ];
        (
            template::render(&self.owner_active, &values),
            template::render(&self.owner_passive, &values),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> serde_yaml::Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn test_defaults_from_name() {
        let action = Action::from_yaml("wave", yaml("spoiler: false"), false).unwrap();
        assert_eq!(action.description, "{invoker_member} is waveing {target_member}.");
        assert_eq!(action.help, "waves a member.");
        assert!(action.aliases.is_empty());
        assert!(action.images.is_empty());
        assert!(action.credits.is_none());
        assert!(!action.spoiler);
    }

    #[test]
    fn test_single_strings_become_sequences() {
        let action = Action::from_yaml(
            "hug",
            yaml("aliases: cuddle\nimages: https://example.com/hug.gif"),
            false,
        )
        .unwrap();
        assert_eq!(action.aliases, vec!["cuddle"]);
        assert_eq!(action.images, vec!["https://example.com/hug.gif"]);
    }

    #[test]
    fn test_name_key_is_ignored() {
        let action = Action::from_yaml("pat", yaml("name: something-else"), false).unwrap();
        assert_eq!(action.name, "pat");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Action::from_yaml("pat", yaml("colour: red"), false).unwrap_err();
        assert!(matches!(err, SchemaError::Fields(_)));
        assert!(err.to_string().contains("colour"), "{err}");
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        assert!(matches!(
            Action::from_yaml("pat", yaml("- a\n- b"), false),
            Err(SchemaError::NotMapping)
        ));
    }

    #[test]
    fn test_partial_consent_is_dropped() {
        let action = Action::from_yaml("hug", yaml("consent:\n  active: A"), false).unwrap();
        assert!(action.consent.is_none());
    }

    #[test]
    fn test_partial_consent_fails_in_strict_mode() {
        let err = Action::from_yaml("hug", yaml("consent:\n  active: A"), true).unwrap_err();
        assert!(matches!(err, SchemaError::Gate { gate: "consent", .. }));
        assert!(err.to_string().starts_with("bad \"consent\" data"), "{err}");
    }

    #[test]
    fn test_denial_roles_accept_integers() {
        let action = Action::from_yaml(
            "bite",
            yaml("denial:\n  roles: 1234\n  message: nope"),
            false,
        )
        .unwrap();
        let denial = action.denial.unwrap();
        assert_eq!(denial.roles, vec!["1234"]);
        assert_eq!(denial.message, "nope");
    }

    #[test]
    fn test_denial_without_roles_defaults_empty() {
        let action = Action::from_yaml("bite", yaml("denial:\n  message: nope"), false).unwrap();
        assert!(action.denial.unwrap().roles.is_empty());
    }

    #[test]
    fn test_denial_without_message_is_dropped() {
        let action = Action::from_yaml("bite", yaml("denial:\n  roles: [gagged]"), false).unwrap();
        assert!(action.denial.is_none());
    }

    #[test]
    fn test_describe_and_denied() {
        let action = Action::from_yaml(
            "boop",
            yaml("denial:\n  roles: [sleeping]\n  message: \"{target_member} is asleep.\""),
            false,
        )
        .unwrap();
        let anna = Member::new(1, "anna1").with_display_name("Anna");
        let bo = Member::new(2, "bo").with_display_name("Bo");
        let sleepy = Member::new(3, "zz")
            .with_display_name("Zed")
            .with_roles(vec!["sleeping".into()]);

        assert_eq!(action.describe(&anna, &bo), "Anna is booping Bo.");
        assert!(action.denied(&anna, &bo).is_none());
        assert_eq!(action.denied(&anna, &sleepy).as_deref(), Some("Zed is asleep."));
    }

    #[test]
    fn test_matches_name_and_alias() {
        let action = Action::from_yaml("hug", yaml("aliases: [cuddle, squeeze]"), false).unwrap();
        assert!(action.matches("HUG"));
        assert!(action.matches("squeeze"));
        assert!(!action.matches("wave"));
    }

    #[test]
    fn test_footer() {
        let action = Action::from_yaml("hug", yaml("credits: [Kirin, Ruff]"), false).unwrap();
        assert_eq!(action.footer().as_deref(), Some("Credits: Kirin, Ruff"));
    }
}
