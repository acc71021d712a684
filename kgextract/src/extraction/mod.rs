//! Entity and relation extraction for knowledge graph construction.
//!
//! Both operations follow the same shape: pick a prompt signature from two
//! flags (typed / conversation), make one model call, validate each returned
//! item, and return what survived together with any warnings. Relation
//! extraction additionally drops triples whose subject or object is not in
//! the entity list it was given.

mod entities;
mod extractor;
mod relations;
pub mod signatures;
mod types;

pub use entities::*;
pub use extractor::*;
pub use relations::*;
pub use signatures::SignatureVariant;
pub use types::*;
