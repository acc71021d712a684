//! Command argument structures
//!
//! This module contains the CLI argument structs shared by the extraction commands.

use clap::Args;
use std::path::PathBuf;

/// Where to read the source text from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file, or `-` to read from stdin
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EntityTypeArgs {
    /// Allowed entity type (repeatable); overrides configured node types
    #[arg(long = "node-type", short = 'n')]
    pub node_types: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RelationTypeArgs {
    /// Allowed predicate type (repeatable); overrides configured edge types
    #[arg(long = "edge-type", short = 'e')]
    pub edge_types: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EntitiesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub types: EntityTypeArgs,

    /// Few-shot examples as a JSON array of {source_text, entities}
    #[arg(long)]
    pub examples: Option<PathBuf>,

    /// Do not require every entity to carry a type
    #[arg(long)]
    pub allow_untyped: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RelationsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Entity previously extracted from the same text (repeatable)
    #[arg(long = "entity", required = true)]
    pub entities: Vec<String>,

    #[command(flatten)]
    pub types: RelationTypeArgs,

    /// Few-shot examples as a JSON array of {source_text, relations}
    #[arg(long)]
    pub examples: Option<PathBuf>,

    /// Do not require every predicate to carry a type
    #[arg(long)]
    pub allow_untyped: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub entity_types: EntityTypeArgs,

    #[command(flatten)]
    pub relation_types: RelationTypeArgs,

    /// Entity examples as a JSON array of {source_text, entities}
    #[arg(long)]
    pub entity_examples: Option<PathBuf>,

    /// Relation examples as a JSON array of {source_text, relations}
    #[arg(long)]
    pub relation_examples: Option<PathBuf>,

    /// Do not require types on entities or predicates
    #[arg(long)]
    pub allow_untyped: bool,
}
