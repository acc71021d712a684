//! Entity extraction.

use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::signatures::{SignatureVariant, entity_signature};
use super::{EntityExample, EntityExtraction, EntityWithType, ExtractionWarning};
use crate::lm::{CompletionParams, LanguageModel};
use crate::prompt::{Demo, Predict};

/// Options for one entity extraction call.
#[derive(Debug, Clone)]
pub struct EntityRequest {
    /// Whether the input is a conversation
    pub is_conversation: bool,
    /// Allowed entity types; `None` or empty disables typing
    pub node_types: Option<Vec<String>>,
    /// Whether every entity must carry a type from `node_types`
    pub require_node_type: bool,
    /// In-context demonstrations
    pub examples: Option<Vec<EntityExample>>,
    /// Completion parameters for the model call
    pub params: CompletionParams,
}

impl Default for EntityRequest {
    fn default() -> Self {
        Self {
            is_conversation: false,
            node_types: None,
            require_node_type: true,
            examples: None,
            params: CompletionParams::default(),
        }
    }
}

impl EntityRequest {
    /// Create a request with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the input as a conversation.
    pub fn conversation(mut self, is_conversation: bool) -> Self {
        self.is_conversation = is_conversation;
        self
    }

    /// Restrict entities to the given types.
    pub fn with_node_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set whether every entity must carry a type.
    pub fn require_node_type(mut self, require: bool) -> Self {
        self.require_node_type = require;
        self
    }

    /// Add few-shot examples.
    pub fn with_examples(mut self, examples: Vec<EntityExample>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Set completion parameters.
    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    /// Allowed types, if any were given.
    pub fn allowed_types(&self) -> Option<&[String]> {
        self.node_types.as_deref().filter(|types| !types.is_empty())
    }
}

/// Extract entities from `input` with a single model call.
///
/// Never fails: a failed call yields an empty list, no type mapping and one
/// [`ExtractionWarning::CallFailed`]. With types requested, items lacking a
/// usable `entity` field are skipped with a warning; without types the
/// model's list is returned as is.
pub async fn get_entities(
    model: &dyn LanguageModel,
    input: &str,
    request: &EntityRequest,
) -> EntityExtraction {
    let node_types = request.allowed_types();
    let variant = SignatureVariant::new(node_types.is_some(), request.is_conversation);
    debug!(
        typed = variant.typed,
        conversation = variant.conversation,
        "Selected entity signature"
    );

    let mut inputs = Map::new();
    inputs.insert("source_text".to_string(), json!(input));
    if let Some(types) = node_types {
        inputs.insert("node_types".to_string(), json!(types));
        inputs.insert("require_type".to_string(), json!(request.require_node_type));
    }

    let demos = request
        .examples
        .iter()
        .flatten()
        .map(|example| {
            Demo::new()
                .with("source_text", example.source_text.clone())
                .with("entities", Value::Array(example.entities.clone()))
        })
        .collect();

    let predict = Predict::new(entity_signature(variant))
        .with_demos(demos)
        .with_params(request.params.clone());

    let mut prediction = match predict.call(model, inputs).await {
        Ok(prediction) => prediction,
        Err(e) => {
            let result = EntityExtraction::failed(e.to_string());
            warn!("{}", result.warnings[0]);
            return result;
        }
    };

    let items = prediction.take_list("entities").unwrap_or_default();

    let result = if node_types.is_some() {
        collect_typed(items)
    } else {
        EntityExtraction {
            entities: items.into_iter().map(untyped_label).collect(),
            entity_types: None,
            warnings: Vec::new(),
        }
    };

    info!(
        entities = result.entities.len(),
        skipped = result.warnings.len(),
        "Entity extraction complete"
    );
    result
}

fn collect_typed(items: Vec<Value>) -> EntityExtraction {
    let mut entities = Vec::with_capacity(items.len());
    let mut entity_types = HashMap::new();
    let mut warnings = Vec::new();

    for item in items {
        match validate_entity(&item) {
            Ok(EntityWithType {
                entity,
                entity_type,
            }) => {
                if let Some(entity_type) = entity_type {
                    entity_types.insert(entity.clone(), entity_type);
                }
                entities.push(entity);
            }
            Err(reason) => {
                let warning = ExtractionWarning::InvalidEntity { item, reason };
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    EntityExtraction {
        entities,
        entity_types: Some(entity_types),
        warnings,
    }
}

/// Check a typed entity item. A type is kept only when it is a non-empty string.
pub(crate) fn validate_entity(item: &Value) -> Result<EntityWithType, String> {
    let object = item
        .as_object()
        .ok_or_else(|| "expected an object with an `entity` field".to_string())?;

    let entity = match object.get("entity") {
        Some(Value::String(entity)) if !entity.is_empty() => entity.clone(),
        Some(Value::String(_)) => return Err("`entity` is empty".to_string()),
        Some(other) => return Err(format!("`entity` must be a string, got {}", other)),
        None => return Err("missing field `entity`".to_string()),
    };

    let entity_type = object
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Ok(EntityWithType {
        entity,
        entity_type,
    })
}

/// Render an untyped item as a label without filtering it out.
fn untyped_label(item: Value) -> String {
    match item {
        Value::String(label) => label,
        Value::Object(ref object) => match object.get("entity") {
            Some(Value::String(label)) => label.clone(),
            _ => item.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entity() {
        let ok = validate_entity(&json!({"entity": "Alice", "type": "Person"})).unwrap();
        assert_eq!(ok.entity, "Alice");
        assert_eq!(ok.entity_type.as_deref(), Some("Person"));

        let untyped = validate_entity(&json!({"entity": "XYZ", "type": ""})).unwrap();
        assert_eq!(untyped.entity_type, None);

        let odd_type = validate_entity(&json!({"entity": "XYZ", "type": 7})).unwrap();
        assert_eq!(odd_type.entity_type, None);

        assert!(validate_entity(&json!({"type": "Person"})).is_err());
        assert!(validate_entity(&json!({"entity": 42})).is_err());
        assert!(validate_entity(&json!({"entity": ""})).is_err());
        assert!(validate_entity(&json!("Alice")).is_err());
    }

    #[test]
    fn test_untyped_label() {
        assert_eq!(untyped_label(json!("Alice")), "Alice");
        assert_eq!(untyped_label(json!({"entity": "Bob"})), "Bob");
        assert_eq!(untyped_label(json!({"name": "Carol"})), r#"{"name":"Carol"}"#);
        assert_eq!(untyped_label(json!(42)), "42");
    }

    #[test]
    fn test_allowed_types_ignores_empty_list() {
        let request = EntityRequest::new().with_node_types(Vec::<String>::new());
        assert!(request.allowed_types().is_none());

        let request = EntityRequest::new().with_node_types(["Person"]);
        assert_eq!(request.allowed_types().unwrap(), ["Person".to_string()]);
    }
}
