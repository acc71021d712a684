use crate::args::{EntityTypeArgs, RelationTypeArgs};
use kgextract::KgError;
use kgextract::extraction::{EntityRequest, RelationRequest};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Read the source text from a file, or from stdin when `input` is `-`.
pub fn read_input(input: &str) -> kgextract::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    Ok(std::fs::read_to_string(input)?)
}

/// Load a JSON array of few-shot examples.
pub fn load_examples<T: DeserializeOwned>(path: &Path) -> kgextract::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| KgError::InvalidInput(format!("Invalid examples in {}: {}", path.display(), e)))
}

/// Apply command line overrides to a configured entity request.
pub fn entity_request(
    base: EntityRequest,
    types: &EntityTypeArgs,
    examples: Option<&Path>,
    allow_untyped: bool,
) -> kgextract::Result<EntityRequest> {
    let mut request = base;
    if !types.node_types.is_empty() {
        request = request.with_node_types(types.node_types.clone());
    }
    if allow_untyped {
        request = request.require_node_type(false);
    }
    if let Some(path) = examples {
        request = request.with_examples(load_examples(path)?);
    }
    Ok(request)
}

/// Apply command line overrides to a configured relation request.
pub fn relation_request(
    base: RelationRequest,
    types: &RelationTypeArgs,
    examples: Option<&Path>,
    allow_untyped: bool,
) -> kgextract::Result<RelationRequest> {
    let mut request = base;
    if !types.edge_types.is_empty() {
        request = request.with_edge_types(types.edge_types.clone());
    }
    if allow_untyped {
        request = request.require_edge_type(false);
    }
    if let Some(path) = examples {
        request = request.with_examples(load_examples(path)?);
    }
    Ok(request)
}
