//! Roleplay cog
//!
//! Every loaded action becomes a command: `<action> <member>`. Denial roles
//! are checked first, then consent, and only then is the action performed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::services::SharedCatalog;
use crate::cogs::trait_def::Cog;
use crate::domain::entities::{Action, Command, Embed, Invocation, Member, Reply};
use crate::domain::traits::MemberDirectory;

pub const COG_NAME: &str = "Roleplay";

/// What happened when an action was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The target holds a role that blocks the action
    Denied(String),
    /// Someone has to agree first
    AwaitingConsent {
        /// Members being asked, either the target or the target's owners
        asked: Vec<Member>,
        /// Prompt for the members being asked
        request: String,
        /// Note for the invoker while they wait
        waiting: String,
    },
    Performed(Vec<Reply>),
}

impl ActionOutcome {
    pub fn into_replies(self) -> Vec<Reply> {
        match self {
            ActionOutcome::Denied(message) => vec![Reply::Text(message)],
            ActionOutcome::AwaitingConsent { request, waiting, .. } => {
                vec![Reply::Text(request), Reply::Text(waiting)]
            }
            ActionOutcome::Performed(replies) => replies,
        }
    }
}

/// Decide the outcome of `invoker` running `action` on `target`
pub fn perform(
    action: &Action,
    invoker: &Member,
    target: &Member,
    directory: &dyn MemberDirectory,
) -> ActionOutcome {
    if let Some(message) = action.denied(invoker, target) {
        tracing::debug!("{} denied on {}", action.name, target.username);
        return ActionOutcome::Denied(message);
    }

    if let Some(consent) = action.consent.as_ref().filter(|_| invoker.id != target.id) {
        let owners: Vec<Member> = target
            .owners
            .iter()
            .filter_map(|id| directory.member(*id))
            .collect();

        if owners.is_empty() {
            let (request, waiting) = consent.ask_target(invoker, target);
            return ActionOutcome::AwaitingConsent {
                asked: vec![target.clone()],
                request,
                waiting,
            };
        }

        let (request, waiting) = consent.ask_owners(invoker, target, &owners);
        return ActionOutcome::AwaitingConsent {
            asked: owners,
            request,
            waiting,
        };
    }

    let embed = Embed::new(action.describe(invoker, target)).with_footer(action.footer());
    let replies = match action.pick_image() {
        Some(image) if action.spoiler => {
            vec![Reply::Embed(embed), Reply::Spoiler(image.to_string())]
        }
        image => vec![Reply::Embed(embed.with_image(image))],
    };
    ActionOutcome::Performed(replies)
}

/// Exposes the action catalog as commands
pub struct RoleplayCog {
    catalog: Arc<SharedCatalog>,
    directory: Arc<dyn MemberDirectory>,
}

impl RoleplayCog {
    pub fn new(catalog: Arc<SharedCatalog>, directory: Arc<dyn MemberDirectory>) -> Self {
        Self { catalog, directory }
    }

    fn action_command(&self, action: &Action) -> Command {
        let name = action.name.clone();
        let catalog = Arc::clone(&self.catalog);
        let directory = Arc::clone(&self.directory);

        Command::new(&action.name)
            .with_description(&action.help)
            .with_aliases(action.aliases.clone())
            .with_usage(format!("{} <member>", action.name))
            .with_handler(move |inv| run_action(&catalog, directory.as_ref(), &name, inv))
    }

    fn list_command(&self) -> Command {
        let catalog = Arc::clone(&self.catalog);
        Command::new("actions")
            .with_description("List roleplay actions")
            .with_handler(move |_| {
                let names = catalog.snapshot().list();
                if names.is_empty() {
                    return Ok(vec![Reply::text("No actions loaded.")]);
                }
                Ok(vec![Reply::text(format!("Actions: {}", names.join(", ")))])
            })
    }

    fn show_command(&self) -> Command {
        let catalog = Arc::clone(&self.catalog);
        Command::new("action")
            .with_description("Show details of a roleplay action")
            .with_usage("action <name>")
            .with_handler(move |inv| {
                let name = inv
                    .arg(0)
                    .ok_or_else(|| CommandError::InvalidArgs("Usage: action <name>".to_string()))?;
                let snapshot = catalog.snapshot();
                match snapshot.resolve(name) {
                    Some(action) => Ok(vec![Reply::Text(summary(action))]),
                    None => Ok(vec![Reply::text(format!("No action named '{}'.", name))]),
                }
            })
    }
}

fn run_action(
    catalog: &SharedCatalog,
    directory: &dyn MemberDirectory,
    name: &str,
    inv: &Invocation,
) -> Result<Vec<Reply>, CommandError> {
    let snapshot = catalog.snapshot();
    let action = snapshot.get(name).ok_or_else(|| {
        CommandError::ExecutionFailed(format!("Action '{}' is no longer loaded", name))
    })?;

    let query = inv
        .arg(0)
        .ok_or_else(|| CommandError::InvalidArgs(format!("Usage: {} <member>", name)))?;

    let Some(target) = directory.lookup(query) else {
        return Ok(vec![Reply::text(format!("Couldn't find member '{}'.", query))]);
    };

    Ok(perform(action, &inv.invoker, &target, directory).into_replies())
}

/// Multi-line description of an action for the `action` command
pub fn summary(action: &Action) -> String {
    let mut out = format!("{} - {}", action.name, action.help);
    if !action.aliases.is_empty() {
        out.push_str(&format!("\nAliases: {}", action.aliases.join(", ")));
    }
    out.push_str(&format!("\nImages: {}", action.images.len()));
    if action.spoiler {
        out.push_str(" (spoilered)");
    }
    if action.consent.is_some() {
        out.push_str("\nRequires consent");
    }
    if let Some(denial) = &action.denial {
        out.push_str(&format!("\nDenied for roles: {}", denial.roles.join(", ")));
    }
    if let Some(footer) = action.footer() {
        out.push_str(&format!("\n{}", footer));
    }
    out
}

impl Cog for RoleplayCog {
    fn name(&self) -> &str {
        COG_NAME
    }

    fn description(&self) -> &str {
        "Roleplay actions loaded from YAML definitions"
    }

    fn commands(&self) -> Vec<Command> {
        let snapshot = self.catalog.snapshot();
        let mut commands = vec![self.list_command(), self.show_command()];
        commands.extend(snapshot.all().iter().map(|a| self.action_command(a)));
        commands
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("actions-dir".to_string(), self.catalog.loader().dir().display().to_string()),
            ("actions".to_string(), self.catalog.snapshot().len().to_string()),
        ])
    }

    fn reload(&self) -> Result<String, String> {
        self.catalog
            .reload()
            .map(|count| format!("Reloaded {} actions", count))
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::directory::StaticDirectory;

    fn action(name: &str, yaml: &str) -> Action {
        Action::from_yaml(name, serde_yaml::from_str(yaml).unwrap(), false).unwrap()
    }

    fn anna() -> Member {
        Member::new(1, "anna1").with_display_name("Anna")
    }

    fn bo() -> Member {
        Member::new(2, "bo").with_display_name("Bo")
    }

    #[test]
    fn test_perform_plain_action() {
        let wave = action(
            "wave",
            r#"
description: "{invoker_member} waves at {target_member}."
images: https://example.com/w.gif
"#,
        );
        let directory = StaticDirectory::new(vec![anna(), bo()]);

        let outcome = perform(&wave, &anna(), &bo(), &directory);
        assert_eq!(
            outcome,
            ActionOutcome::Performed(vec![Reply::Embed(
                Embed::new("Anna waves at Bo.").with_image(Some("https://example.com/w.gif"))
            )])
        );
    }

    #[test]
    fn test_perform_spoiler_action() {
        let lick = action(
            "lick",
            "spoiler: true\nimages: [https://example.com/l.gif]\ncredits: Kirin",
        );
        let directory = StaticDirectory::new(vec![]);

        let replies = perform(&lick, &anna(), &bo(), &directory).into_replies();
        assert_eq!(replies.len(), 2);
        match &replies[0] {
            Reply::Embed(embed) => {
                assert!(embed.image.is_none());
                assert_eq!(embed.footer.as_deref(), Some("Credits: Kirin"));
            }
            other => panic!("expected embed, got {:?}", other),
        }
        assert_eq!(replies[1], Reply::Spoiler("https://example.com/l.gif".to_string()));
    }

    #[test]
    fn test_denial_wins_over_consent() {
        let bite = action(
            "bite",
            r#"
consent: {active: A, passive: B, owner_active: C, owner_passive: D}
denial: {roles: [muzzled], message: "{target_member} is muzzled."}
"#,
        );
        let target = bo().with_roles(vec!["muzzled".to_string()]);
        let directory = StaticDirectory::new(vec![]);

        assert_eq!(
            perform(&bite, &anna(), &target, &directory),
            ActionOutcome::Denied("Bo is muzzled.".to_string())
        );
    }

    #[test]
    fn test_consent_asks_target() {
        let hug = action(
            "hug",
            r#"
consent:
  active: "{target_member}, {invoker_member} wants to hug you."
  passive: "{invoker_member}, waiting on {target_member}."
  owner_active: C
  owner_passive: D
"#,
        );
        let directory = StaticDirectory::new(vec![anna(), bo()]);

        let outcome = perform(&hug, &anna(), &bo(), &directory);
        assert_eq!(
            outcome,
            ActionOutcome::AwaitingConsent {
                asked: vec![bo()],
                request: "Bo, Anna wants to hug you.".to_string(),
                waiting: "Anna, waiting on Bo.".to_string(),
            }
        );
    }

    #[test]
    fn test_consent_asks_owners() {
        let hug = action(
            "hug",
            r#"
consent:
  active: A
  passive: B
  owner_active: "{owner}, {invoker_member} wants to hug {target_member}."
  owner_passive: "{invoker_member} asked {owner}."
"#,
        );
        let cara = Member::new(3, "cara").with_display_name("Cara");
        let pet = bo().with_owner(3);
        let directory = StaticDirectory::new(vec![anna(), pet.clone(), cara.clone()]);

        match perform(&hug, &anna(), &pet, &directory) {
            ActionOutcome::AwaitingConsent { asked, request, waiting } => {
                assert_eq!(asked, vec![cara]);
                assert_eq!(request, "Cara, Anna wants to hug Bo.");
                assert_eq!(waiting, "Anna asked Cara.");
            }
            other => panic!("expected consent request, got {:?}", other),
        }
    }

    #[test]
    fn test_self_target_skips_consent() {
        let hug = action(
            "hug",
            "consent: {active: A, passive: B, owner_active: C, owner_passive: D}",
        );
        let directory = StaticDirectory::new(vec![]);
        assert!(matches!(
            perform(&hug, &anna(), &anna(), &directory),
            ActionOutcome::Performed(_)
        ));
    }

    #[test]
    fn test_summary() {
        let hug = action("hug", "aliases: cuddle\ndenial: {roles: [a, b], message: m}");
        assert_eq!(
            summary(&hug),
            "hug - hugs a member.\nAliases: cuddle\nImages: 0\nDenied for roles: a, b"
        );
    }
}
