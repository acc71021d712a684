//! Relation extraction.

use serde_json::{Map, Value, json};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::signatures::{SignatureVariant, relation_signature};
use super::{ExtractionWarning, Relation, RelationExample, RelationExtraction, RelationWithType};
use crate::lm::{CompletionParams, LanguageModel};
use crate::prompt::{Demo, Predict};

/// Options for one relation extraction call.
#[derive(Debug, Clone)]
pub struct RelationRequest {
    /// Whether the input is a conversation
    pub is_conversation: bool,
    /// Allowed predicate types; `None` or empty disables typing
    pub edge_types: Option<Vec<String>>,
    /// Whether every predicate must carry a type from `edge_types`
    pub require_edge_type: bool,
    /// In-context demonstrations
    pub examples: Option<Vec<RelationExample>>,
    /// Completion parameters for the model call
    pub params: CompletionParams,
}

impl Default for RelationRequest {
    fn default() -> Self {
        Self {
            is_conversation: false,
            edge_types: None,
            require_edge_type: true,
            examples: None,
            params: CompletionParams::default(),
        }
    }
}

impl RelationRequest {
    /// Create a request with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the input as a conversation.
    pub fn conversation(mut self, is_conversation: bool) -> Self {
        self.is_conversation = is_conversation;
        self
    }

    /// Restrict predicates to the given types.
    pub fn with_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set whether every predicate must carry a type.
    pub fn require_edge_type(mut self, require: bool) -> Self {
        self.require_edge_type = require;
        self
    }

    /// Add few-shot examples.
    pub fn with_examples(mut self, examples: Vec<RelationExample>) -> Self {
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
        self.edge_types.as_deref().filter(|types| !types.is_empty())
    }
}

/// Extract relations between `entities` from `input` with a single model call.
///
/// Never fails: a failed call yields an empty list, no type mapping and one
/// [`ExtractionWarning::CallFailed`]. Items not matching the relation schema
/// are skipped with a warning. Only relations whose subject and object are
/// both in `entities` are kept.
pub async fn get_relations(
    model: &dyn LanguageModel,
    input: &str,
    entities: &[String],
    request: &RelationRequest,
) -> RelationExtraction {
    let edge_types = request.allowed_types();
    let variant = SignatureVariant::new(edge_types.is_some(), request.is_conversation);
    debug!(
        typed = variant.typed,
        conversation = variant.conversation,
        entities = entities.len(),
        "Selected relation signature"
    );

    let mut inputs = Map::new();
    inputs.insert("source_text".to_string(), json!(input));
    inputs.insert("entities".to_string(), json!(entities));
    if let Some(types) = edge_types {
        inputs.insert("edge_types".to_string(), json!(types));
        inputs.insert("require_type".to_string(), json!(request.require_edge_type));
    }

    let demos = request
        .examples
        .iter()
        .flatten()
        .map(|example| {
            Demo::new()
                .with("source_text", example.source_text.clone())
                .with("relations", Value::Array(example.relations.clone()))
        })
        .collect();

    let predict = Predict::new(relation_signature(variant))
        .with_demos(demos)
        .with_params(request.params.clone());

    let mut prediction = match predict.call(model, inputs).await {
        Ok(prediction) => prediction,
        Err(e) => {
            let result = RelationExtraction::failed(e.to_string());
            warn!("{}", result.warnings[0]);
            return result;
        }
    };

    let items = prediction.take_list("relations").unwrap_or_default();
    let known: HashSet<&str> = entities.iter().map(String::as_str).collect();

    let mut relations = Vec::new();
    let mut edge_type_map = HashMap::new();
    let mut warnings = Vec::new();

    for item in items {
        let (relation, predicate_type) = match validate_relation(&item, variant.typed) {
            Ok(parsed) => parsed,
            Err(reason) => {
                let warning = ExtractionWarning::InvalidRelation { item, reason };
                warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
        };

        if !known.contains(relation.subject.as_str()) || !known.contains(relation.object.as_str())
        {
            debug!(
                subject = %relation.subject,
                object = %relation.object,
                "Dropping relation with unknown endpoint"
            );
            continue;
        }

        if let Some(predicate_type) = predicate_type {
            edge_type_map.insert(relation.predicate.clone(), predicate_type);
        }
        relations.push(relation.into_triple());
    }

    info!(
        relations = relations.len(),
        skipped = warnings.len(),
        "Relation extraction complete"
    );

    RelationExtraction {
        relations,
        edge_types: variant.typed.then_some(edge_type_map),
        warnings,
    }
}

/// Validate one relation item against the plain or typed schema.
///
/// Returns the relation plus its predicate type, when typed and non-empty.
pub(crate) fn validate_relation(
    item: &Value,
    typed: bool,
) -> Result<(Relation, Option<String>), String> {
    // serde would otherwise accept a positional [subject, predicate, object] array
    if !item.is_object() {
        return Err("expected an object with `subject`, `predicate` and `object`".to_string());
    }

    if typed {
        let parsed: RelationWithType =
            serde_json::from_value(item.clone()).map_err(|e| e.to_string())?;
        let predicate_type = parsed.predicate_type.filter(|t| !t.is_empty());
        Ok((parsed.relation, predicate_type))
    } else {
        let parsed: Relation = serde_json::from_value(item.clone()).map_err(|e| e.to_string())?;
        Ok((parsed, None))
    }
}
