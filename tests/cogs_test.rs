//! Cog integration tests: member search and roleplay commands end to end
//! Run with: cargo test --test cogs_test

use std::fs;
use std::sync::{Arc, Once};

use ruff_cogs::application::errors::CommandError;
use ruff_cogs::application::services::{ActionLoader, MemberFinder, SharedCatalog};
use ruff_cogs::cogs::{CogManager, ModHelperCog, RoleplayCog};
use ruff_cogs::domain::entities::{Embed, Invocation, Member, Reply};
use ruff_cogs::infrastructure::directory::StaticDirectory;
use ruff_cogs::infrastructure::fuzzy::WeightedRatio;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn members() -> Vec<Member> {
    vec![
        Member::new(101, "anna1").with_display_name("Anna"),
        Member::new(102, "ann2").with_display_name("Ann"),
        Member::new(103, "zed").with_display_name("Zed").with_roles(vec!["sleeping".to_string()]),
        Member::new(104, "pup").with_display_name("Pup").with_owner(101),
    ]
}

fn invoke(name: &str, args: &[&str]) -> Invocation {
    Invocation::new(
        name,
        args.iter().map(|s| s.to_string()).collect(),
        Member::new(102, "ann2").with_display_name("Ann"),
    )
}

struct Setup {
    _dir: tempfile::TempDir,
    manager: CogManager,
}

const WAVE: &str = r#"
description: "{invoker_member} waves at {target_member}."
images: https://example.com/wave.gif
aliases: hi
"#;

const HUG: &str = r#"
consent:
  active: "{target_member}, {invoker_member} wants to hug you."
  passive: "Waiting for {target_member}..."
  owner_active: "{owner}, {invoker_member} wants to hug {target_member}."
  owner_passive: "Waiting for {owner}..."
"#;

const BOOP: &str = r#"
denial:
  roles: sleeping
  message: "{target_member} is asleep."
"#;

fn setup() -> Setup {
    setup_with(&[])
}

/// Standard actions plus any extra `(file, contents)` pairs
fn setup_with(extra: &[(&str, &str)]) -> Setup {
    ensure_init();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("wave.yml"), WAVE).unwrap();
    fs::write(dir.path().join("hug.yaml"), HUG).unwrap();
    fs::write(dir.path().join("boop.yml"), BOOP).unwrap();
    for (file, contents) in extra {
        fs::write(dir.path().join(file), contents).unwrap();
    }

    let directory = Arc::new(StaticDirectory::new(members()));
    let catalog = Arc::new(SharedCatalog::load(ActionLoader::new(dir.path())).unwrap());
    let finder = MemberFinder::new(directory.clone(), Arc::new(WeightedRatio::new()));

    let mut manager = CogManager::new();
    manager.register(ModHelperCog::new(Arc::new(finder), 70, 5)).unwrap();
    manager.register(RoleplayCog::new(catalog, directory)).unwrap();

    Setup { _dir: dir, manager }
}

#[test]
fn test_find_members() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("find", &["ann"])).unwrap();
    assert_eq!(
        replies,
        vec![
            Reply::text("### Anna (anna1) - 90%\n101"),
            Reply::text("### Ann (ann2) - 90%\n102"),
        ]
    );
}

#[test]
fn test_find_without_matches() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("find", &["qqq"])).unwrap();
    assert_eq!(
        replies,
        vec![Reply::text("No matches found for 'qqq' with the minimum score of 70.")]
    );
}

#[test]
fn test_action_by_alias() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("hi", &["Anna"])).unwrap();
    assert_eq!(
        replies,
        vec![Reply::Embed(
            Embed::new("Ann waves at Anna.").with_image(Some("https://example.com/wave.gif"))
        )]
    );
}

#[test]
fn test_action_denied() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("boop", &["zed"])).unwrap();
    assert_eq!(replies, vec![Reply::text("Zed is asleep.")]);

    let replies = setup.manager.handle(&invoke("boop", &["anna1"])).unwrap();
    assert_eq!(replies, vec![Reply::Embed(Embed::new("Ann is booping Anna."))]);
}

#[test]
fn test_action_asks_for_consent() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("hug", &["Anna"])).unwrap();
    assert_eq!(
        replies,
        vec![
            Reply::text("Anna, Ann wants to hug you."),
            Reply::text("Waiting for Anna..."),
        ]
    );

    let replies = setup.manager.handle(&invoke("hug", &["pup"])).unwrap();
    assert_eq!(
        replies,
        vec![
            Reply::text("Anna, Ann wants to hug Pup."),
            Reply::text("Waiting for Anna..."),
        ]
    );
}

#[test]
fn test_action_argument_errors() {
    let mut setup = setup();
    assert!(matches!(
        setup.manager.handle(&invoke("wave", &[])),
        Err(CommandError::InvalidArgs(_))
    ));
    assert_eq!(
        setup.manager.handle(&invoke("wave", &["nobody"])).unwrap(),
        vec![Reply::text("Couldn't find member 'nobody'.")]
    );
    assert!(matches!(
        setup.manager.handle(&invoke("dance", &["Anna"])),
        Err(CommandError::NotFound(_))
    ));
}

#[test]
fn test_actions_listing() {
    let mut setup = setup();
    let replies = setup.manager.handle(&invoke("actions", &[])).unwrap();
    assert_eq!(replies, vec![Reply::text("Actions: boop, hug, wave")]);

    let replies = setup.manager.handle(&invoke("action", &["hi"])).unwrap();
    assert_eq!(
        replies,
        vec![Reply::text("wave - waves a member.\nAliases: hi\nImages: 1")]
    );
}

#[test]
fn test_reload_picks_up_new_actions() {
    let mut setup = setup();
    fs::write(setup._dir.path().join("pat.yml"), "help: Pats a member.\n").unwrap();

    assert!(matches!(
        setup.manager.handle(&invoke("pat", &["Anna"])),
        Err(CommandError::NotFound(_))
    ));

    let replies = setup.manager.handle(&invoke("reload", &[])).unwrap();
    assert!(replies.contains(&Reply::text("Reloaded 4 actions")));

    let replies = setup.manager.handle(&invoke("pat", &["Anna"])).unwrap();
    assert_eq!(replies, vec![Reply::Embed(Embed::new("Ann is pating Anna."))]);
}

#[test]
fn test_shared_alias_resolves_to_same_action() {
    let salute = (
        "salute.yml",
        "description: \"{invoker_member} salutes {target_member}.\"\naliases: hi\n",
    );

    for _ in 0..10 {
        let mut setup = setup_with(&[salute]);
        let replies = setup.manager.handle(&invoke("hi", &["anna1"])).unwrap();
        assert_eq!(replies, vec![Reply::Embed(Embed::new("Ann salutes Anna."))]);
    }

    // wave keeps its name, only the alias went to salute
    let mut setup = setup_with(&[salute]);
    let replies = setup.manager.handle(&invoke("wave", &["anna1"])).unwrap();
    assert_eq!(
        replies,
        vec![Reply::Embed(
            Embed::new("Ann waves at Anna.").with_image(Some("https://example.com/wave.gif"))
        )]
    );
}

#[test]
fn test_action_files_cannot_shadow_fixed_commands() {
    let mut setup = setup_with(&[
        ("find.yml", "description: found\n"),
        ("help.yml", "description: helped\n"),
        ("reload.yml", "description: reloaded\n"),
        ("actions.yml", "description: listed\n"),
    ]);

    let replies = setup.manager.handle(&invoke("find", &["ann"])).unwrap();
    assert_eq!(replies[0], Reply::text("### Anna (anna1) - 90%\n101"));

    let replies = setup.manager.handle(&invoke("help", &["find"])).unwrap();
    assert!(replies[0].render().starts_with("find - Find a user"), "{:?}", replies);

    let replies = setup.manager.handle(&invoke("actions", &[])).unwrap();
    assert!(replies[0].render().starts_with("Actions: "), "{:?}", replies);

    // skipped again after a reload rebuilds the registry
    let replies = setup.manager.handle(&invoke("reload", &[])).unwrap();
    assert!(replies.contains(&Reply::text("Reloaded 7 actions")), "{:?}", replies);
    let replies = setup.manager.handle(&invoke("find", &["ann"])).unwrap();
    assert_eq!(replies[0], Reply::text("### Anna (anna1) - 90%\n101"));
}
