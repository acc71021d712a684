//! Command definitions
//!
//! This module contains the top-level parser and the command enum.

use crate::args::*;
use clap::{Parser, Subcommand};
use kgextract::config::LogLevel;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kgextract-cli")]
#[command(about = "Extract knowledge graph entities and relations with a language model", long_about = None)]
#[command(version = kgextract::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json); defaults are searched otherwise
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Treat the input as a conversation transcript
    #[arg(long, global = true)]
    pub conversation: bool,

    /// Verbose output (debug level logging, overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only, overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// True when output should be machine readable
    pub fn json_output(&self) -> bool {
        self.output == "json"
    }

    /// Log level forced by `--quiet` or `--verbose`; quiet wins when both are given
    pub fn forced_log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            Some(LogLevel::Error)
        } else if self.verbose {
            Some(LogLevel::Debug)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Extract entities from text
    #[command(
        alias = "ents",
        long_about = r#"
Extract entities from text with a single language model call.

With one or more --node-type flags the model is asked to assign a type to
every entity, and the output includes an entity -> type mapping. Items the
model returns without a usable `entity` field are skipped and reported as
warnings.

EXAMPLES:
  kgextract-cli entities notes.txt
  kgextract-cli entities notes.txt -n Person -n Organization
  cat chat.log | kgextract-cli --conversation entities -
"#
    )]
    Entities(EntitiesArgs),

    /// Extract subject-predicate-object relations between known entities
    #[command(
        alias = "rels",
        long_about = r#"
Extract relation triples from text, given the entities already found in it.

Triples whose subject or object is not one of the --entity values are
dropped. With --edge-type the model also assigns a type to each predicate.

EXAMPLES:
  kgextract-cli relations notes.txt --entity Alice --entity Acme
  kgextract-cli relations notes.txt --entity Alice --entity Acme -e EMPLOYMENT
"#
    )]
    Relations(RelationsArgs),

    /// Extract entities, then relations between them
    Extract(ExtractArgs),
}
