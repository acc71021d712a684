//! Command handlers for the kgextract CLI
//!
//! Each handler returns `Ok(false)` when the model call behind it failed, so
//! the binary can exit non-zero after printing the (empty) result.

pub mod entities;
pub mod extract;
pub mod relations;

pub use entities::handle_entities_command;
pub use extract::handle_extract_command;
pub use relations::handle_relations_command;
