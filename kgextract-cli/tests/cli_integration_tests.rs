//! Integration tests for the kgextract CLI
//!
//! These tests cover argument parsing, input and example loading, request
//! overrides and context construction. They never reach a model endpoint.

use clap::{CommandFactory, Parser};
use kgextract::config::LogLevel;
use kgextract::extraction::{EntityExample, EntityRequest, RelationExample, RelationRequest};
use kgextract_cli::args::{EntityTypeArgs, RelationTypeArgs};
use kgextract_cli::{
    Cli, Commands, KgCliContext, entity_request, load_config, load_examples, read_input,
    relation_request,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_entities_command() {
    let cli = Cli::try_parse_from([
        "kgextract-cli",
        "entities",
        "notes.txt",
        "-n",
        "Person",
        "--node-type",
        "Organization",
        "--allow-untyped",
    ])
    .unwrap();

    assert_eq!(cli.output, "table");
    assert!(!cli.conversation);
    match cli.command {
        Commands::Entities(args) => {
            assert_eq!(args.input.input, "notes.txt");
            assert_eq!(args.types.node_types, vec!["Person", "Organization"]);
            assert!(args.allow_untyped);
            assert!(args.examples.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "kgextract-cli",
        "extract",
        "--conversation",
        "--output",
        "json",
        "-q",
    ])
    .unwrap();

    assert!(cli.conversation);
    assert!(cli.json_output());
    assert!(cli.quiet);
    match cli.command {
        Commands::Extract(args) => assert_eq!(args.input.input, "-"),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_log_flags_force_a_level() {
    let parse = |args: &[&str]| {
        let mut argv = vec!["kgextract-cli"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().forced_log_level()
    };

    assert_eq!(parse(&["extract"]), None);
    assert_eq!(parse(&["extract", "-q"]), Some(LogLevel::Error));
    assert_eq!(parse(&["extract", "--verbose"]), Some(LogLevel::Debug));
    assert_eq!(parse(&["-v", "-q", "extract"]), Some(LogLevel::Error));
}

#[test]
fn test_quiet_help_describes_errors_only() {
    let help = Cli::command().render_help().to_string();
    assert!(help.contains("errors only"));
    assert!(!help.contains("suppress all logging"));
}

#[test]
fn test_relations_requires_entities() {
    assert!(Cli::try_parse_from(["kgextract-cli", "relations", "notes.txt"]).is_err());

    let cli = Cli::try_parse_from([
        "kgextract-cli",
        "rels",
        "notes.txt",
        "--entity",
        "Alice",
        "--entity",
        "Acme",
        "-e",
        "EMPLOYMENT",
    ])
    .unwrap();
    match cli.command {
        Commands::Relations(args) => {
            assert_eq!(args.entities, vec!["Alice", "Acme"]);
            assert_eq!(args.types.edge_types, vec!["EMPLOYMENT"]);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_version_and_help() {
    let cli = Cli::try_parse_from(["kgextract-cli", "version"]).unwrap();
    assert!(matches!(cli.command, Commands::Version));

    let err = Cli::try_parse_from(["kgextract-cli", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_read_input_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.txt");
    fs::write(&path, "Alice works at Acme.").unwrap();

    let text = read_input(path.to_str().unwrap()).unwrap();
    assert_eq!(text, "Alice works at Acme.");

    let missing = temp_dir.path().join("missing.txt");
    assert!(matches!(
        read_input(missing.to_str().unwrap()),
        Err(kgextract::KgError::Io(_))
    ));
}

#[test]
fn test_load_examples() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("examples.json");
    fs::write(
        &path,
        r#"[{"source_text": "Bob visited Rome.", "entities": ["Bob", {"entity": "Rome", "type": "City"}]}]"#,
    )
    .unwrap();

    let examples: Vec<EntityExample> = load_examples(&path).unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].source_text, "Bob visited Rome.");
    assert_eq!(examples[0].entities.len(), 2);

    fs::write(&path, r#"{"not": "a list"}"#).unwrap();
    let err = load_examples::<RelationExample>(&path).unwrap_err();
    assert!(matches!(err, kgextract::KgError::InvalidInput(_)));
}

#[test]
fn test_request_overrides() {
    let base = EntityRequest::new().with_node_types(["Thing"]);
    let request = entity_request(base.clone(), &EntityTypeArgs::default(), None, false).unwrap();
    assert_eq!(request.allowed_types().unwrap(), ["Thing".to_string()]);
    assert!(request.require_node_type);

    let types = EntityTypeArgs {
        node_types: vec!["Person".to_string()],
    };
    let request = entity_request(base, &types, None, true).unwrap();
    assert_eq!(request.allowed_types().unwrap(), ["Person".to_string()]);
    assert!(!request.require_node_type);

    let types = RelationTypeArgs {
        edge_types: vec!["EMPLOYMENT".to_string()],
    };
    let request = relation_request(RelationRequest::new(), &types, None, false).unwrap();
    assert_eq!(request.allowed_types().unwrap(), ["EMPLOYMENT".to_string()]);
    assert!(request.require_edge_type);
    assert!(request.examples.is_none());
}

#[test]
fn test_context_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("kgextract.toml");
    fs::write(
        &path,
        r#"
[llm]
base_url = "http://localhost:11434/v1"
model = "llama3.1"

[extraction]
node_types = ["Person"]
"#,
    )
    .unwrap();

    let config = load_config(Some(&path), true).unwrap();
    assert_eq!(config.llm.model, "llama3.1");
    assert!(config.extraction.is_conversation);

    let ctx = KgCliContext::new(config).unwrap();
    assert_eq!(ctx.extractor.model().name(), "llama3.1");
    let request = ctx.extractor.entity_request();
    assert!(request.is_conversation);
    assert_eq!(request.allowed_types().unwrap(), ["Person".to_string()]);
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("kgextract.toml");
    fs::write(&path, "[llm]\ntimeout_secs = 0\n").unwrap();

    assert!(matches!(
        load_config(Some(&path), false),
        Err(kgextract::KgError::Configuration(_))
    ));
}
