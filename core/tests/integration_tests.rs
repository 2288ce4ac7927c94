use pdbuild_cmdline::{
    Argument, CmdLineError, Data, HelpLayout, ParseOptions, Parser, Registry, Value, ValueOption,
};

const CATEGORY: &str = "General build settings:";

/// Catalog shaped like the build driver's global switches.
fn build_registry() -> Registry {
    let mut registry = Registry::new();

    registry.add_value(
        Value::new("general.help", "Show this help.", CATEGORY)
            .with_default(false)
            .allow_repeat(),
    );
    registry.add_argument(Argument::flag("general.help", "help"));

    registry.add_value(
        Value::new("general.workspace-dir", "Workspace directory.", CATEGORY)
            .with_default("/src/.workspace"),
    );
    registry.add_argument(Argument::text(
        "general.workspace-dir",
        "workspace-dir",
        "<dir>",
    ));

    registry.add_value(
        Value::new("general.librarian.mode", "Checkout strategy.", CATEGORY)
            .with_default("update")
            .with_options(
                ["none", "fetch", "update", "force", "asis"]
                    .into_iter()
                    .map(|mode| ValueOption::new(mode, &format!("{mode} mode.")))
                    .collect(),
            ),
    );
    registry.add_argument(Argument::text(
        "general.librarian.mode",
        "librarian-mode",
        "<mode>",
    ));

    registry.add_value(Value::list(
        "general.librarian.origins",
        "Origin URLs.",
        CATEGORY,
        vec!["https://a".to_string()],
    ));
    registry.add_argument(Argument::text(
        "general.librarian.origins",
        "librarian-origins",
        "<URL>",
    ));

    registry
}

fn strict<'r>(registry: &'r Registry, args: &[&str]) -> pdbuild_cmdline::Result<pdbuild_cmdline::Context<'r>> {
    Parser::new(registry, args.iter().copied()).parse()
}

// ---------------------------------------------------------------------------
// Context creation
// ---------------------------------------------------------------------------

#[test]
fn fresh_context_matches_prototype_defaults() {
    let registry = build_registry();
    let context = registry.create_context();
    for key in registry.value_keys() {
        assert!(!context.is_set(key), "{key} should be unset");
        assert_eq!(context.resolve(key), registry.resolve(key));
    }
}

#[test]
fn registry_is_consistent() {
    assert!(build_registry().validate().is_empty());
}

// ---------------------------------------------------------------------------
// Switch dispatch
// ---------------------------------------------------------------------------

#[test]
fn flag_switch_sets_true() {
    let registry = build_registry();
    let context = strict(&registry, &["--help"]).unwrap();
    assert!(context.is_set("general.help"));
    assert_eq!(context.resolve("general.help"), Some(Data::Flag(true)));
}

#[test]
fn repeatable_flag_can_be_given_twice() {
    let registry = build_registry();
    let context = strict(&registry, &["--help", "--help"]).unwrap();
    assert!(context.resolve_flag("general.help"));
}

#[test]
fn unique_switch_given_twice_fails() {
    let registry = build_registry();
    let err = strict(
        &registry,
        &["--workspace-dir", "/a", "--workspace-dir", "/b"],
    )
    .unwrap_err();
    assert!(matches!(err, CmdLineError::DuplicateCommand { index: 2, .. }));
    assert_eq!(
        err.to_string(),
        "command '--workspace-dir' @2 can not be set twice"
    );
}

#[test]
fn missing_operand_fails_arity() {
    let registry = build_registry();
    let err = strict(&registry, &["--workspace-dir"]).unwrap_err();
    assert!(matches!(
        err,
        CmdLineError::ArityMismatch {
            expected: 1,
            actual: 0,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "command '--workspace-dir' @0 expected 1 arguments but got 0"
    );
}

#[test]
fn restricted_option_accepts_only_listed_modes() {
    let registry = build_registry();

    let err = strict(&registry, &["--librarian-mode", "bogus"]).unwrap_err();
    assert!(matches!(err, CmdLineError::InvalidOption { ref option, .. } if option == "bogus"));

    let context = strict(&registry, &["--librarian-mode", "fetch"]).unwrap();
    assert_eq!(
        context.resolve_text("general.librarian.mode").as_deref(),
        Some("fetch")
    );
}

#[test]
fn list_grammar_applies_in_order() {
    let registry = build_registry();
    let steps: [(&[&str], &[&str]); 4] = [
        (&["--librarian-origins", "=x"], &["x"]),
        (
            &["--librarian-origins", "=x", "--librarian-origins", "+y"],
            &["y", "x"],
        ),
        (
            &[
                "--librarian-origins",
                "=x",
                "--librarian-origins",
                "+y",
                "--librarian-origins",
                "z",
            ],
            &["y", "x", "z"],
        ),
        (
            &[
                "--librarian-origins",
                "=x",
                "--librarian-origins",
                "+y",
                "--librarian-origins",
                "z",
                "--librarian-origins",
                "=",
            ],
            &[],
        ),
    ];

    for (args, expected) in steps {
        let context = strict(&registry, args).unwrap();
        assert_eq!(context.resolve_list("general.librarian.origins"), expected);
    }
}

#[test]
fn required_value_lists_every_binding() {
    let mut registry = build_registry();
    registry.add_value(Value::new("general.module", "Module to build.", CATEGORY).required());
    registry.add_argument(Argument::text("general.module", "module", "<name>"));
    registry.add_argument(Argument::text("general.module", "m", "<name>"));

    let err = strict(&registry, &["--help"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "command '--module <name>, --m <name>' is expected to be set"
    );
}

// ---------------------------------------------------------------------------
// Tolerant mode
// ---------------------------------------------------------------------------

#[test]
fn unknown_switch_is_ignored_only_when_tolerant() {
    let registry = build_registry();
    let args = ["--unknown", "x", "--workspace-dir", "/a"];

    let context = Parser::new(&registry, args)
        .with_options(ParseOptions::tolerant())
        .parse()
        .unwrap();
    assert_eq!(
        context.resolve_text("general.workspace-dir").as_deref(),
        Some("/a")
    );

    let err = Parser::new(&registry, args).parse().unwrap_err();
    assert!(matches!(err, CmdLineError::UnknownCommand { index: 0, .. }));
    assert!(err.is_recoverable());
}

// ---------------------------------------------------------------------------
// Shared defaults
// ---------------------------------------------------------------------------

#[test]
fn registry_default_change_reaches_unset_values() {
    let registry = build_registry();
    let parsed = strict(&registry, &["--librarian-mode", "force"]).unwrap();
    let untouched = registry.create_context();

    registry
        .set_default("general.librarian.mode", Some(Data::from("asis")))
        .unwrap();

    assert_eq!(
        untouched.resolve_text("general.librarian.mode").as_deref(),
        Some("asis")
    );
    assert_eq!(
        parsed.resolve_text("general.librarian.mode").as_deref(),
        Some("force")
    );
}

#[test]
fn contexts_share_defaults_across_threads() {
    let registry = build_registry();
    std::thread::scope(|scope| {
        for dir in ["/a", "/b", "/c"] {
            let registry = &registry;
            scope.spawn(move || {
                let context = strict(registry, &["--workspace-dir", dir]).unwrap();
                assert_eq!(
                    context.resolve_text("general.workspace-dir").as_deref(),
                    Some(dir)
                );
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Help output
// ---------------------------------------------------------------------------

#[test]
fn help_lists_bound_values_in_one_category() {
    let registry = build_registry();
    let lines = registry.render_help(&HelpLayout::default());

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], CATEGORY);
    assert_eq!(
        lines.iter().filter(|line| line.as_str() == CATEGORY).count(),
        1
    );
    assert!(lines.iter().any(|line| line.starts_with("  --workspace-dir <dir>")));
    assert!(lines.iter().any(|line| line.ends_with("asis: asis mode.")));
    assert!(lines.iter().all(|line| line.chars().count() <= 80));
}
