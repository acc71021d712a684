//! # kgextract
//!
//! Entity and relation extraction for knowledge graph construction, driven by
//! a language model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kgextract::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_node_types(["Person", "Organization"])
//!         .build()?;
//!     let extractor = kgextract::init(&config)?;
//!
//!     let graph = extractor.extract("Alice joined Acme as CTO.").await;
//!     for (subject, predicate, object) in &graph.relations {
//!         println!("{subject} -[{predicate}]-> {object}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Best-effort extraction
//!
//! [`extraction::get_entities`] and [`extraction::get_relations`] never
//! return an error. A failed model call yields an empty result; malformed
//! items are skipped. Either way the problem is logged with `tracing::warn!`
//! and recorded in the result's `warnings`.
//!
//! ## Architecture
//!
//! - **extraction**: the two operations plus an [`extraction::Extractor`] that chains them
//! - **prompt**: signatures, few-shot demos, one-call prediction and reply parsing
//! - **lm**: the [`lm::LanguageModel`] seam and an OpenAI-compatible client
//! - **config** / **logging**: layered configuration and tracing setup

pub mod config;
pub mod extraction;
pub mod lm;
pub mod logging;
pub mod prompt;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigLoader, ExtractionConfig, KgConfig, LogLevel};

    pub use crate::extraction::{
        EntityExample, EntityExtraction, EntityRequest, Extractor, ExtractionWarning,
        GraphExtraction, RelationExample, RelationExtraction, RelationRequest, Triple,
        get_entities, get_relations,
    };

    pub use crate::lm::{CompletionParams, LanguageModel, Message, OpenAiChatModel};

    pub use crate::{KgError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for kgextract operations
#[derive(Debug, thiserror::Error)]
pub enum KgError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] crate::config::ConfigError),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Language model error
    #[error("Language model error: {0}")]
    Model(#[from] crate::lm::LmError),

    /// Prompt execution error
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::prompt::PromptError),

    /// IO error (reading input or example files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that could not be parsed (e.g. an examples file)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for kgextract operations
pub type Result<T> = std::result::Result<T, KgError>;

/// Initialize logging and build an extractor from configuration.
///
/// Logging setup failures are ignored so that a host application's own
/// subscriber keeps working.
pub fn init(config: &config::KgConfig) -> Result<extraction::Extractor> {
    let _ = logging::init(&config.logging);

    extraction::Extractor::from_config(config)
}

/// Initialize with configuration loaded from default files and the environment.
pub fn init_with_defaults() -> Result<extraction::Extractor> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(&config)
}
