//! Entity and relation types for LLM extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// An entity as returned by a typed extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityWithType {
    /// Entity label
    pub entity: String,
    /// Entity type, if the model assigned one
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
}

/// Knowledge graph subject-predicate-object tuple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relation {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Relation {
    /// Convert into a plain tuple.
    pub fn into_triple(self) -> Triple {
        (self.subject, self.predicate, self.object)
    }
}

/// Knowledge graph subject-predicate-object tuple with predicate type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationWithType {
    #[serde(flatten)]
    pub relation: Relation,
    #[serde(default)]
    pub predicate_type: Option<String>,
}

/// A kept relation as (subject, predicate, object).
pub type Triple = (String, String, String);

/// Non-fatal problems encountered during extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// The model call (or reading its reply) failed; nothing was extracted
    CallFailed { message: String },
    /// An entity item lacked a usable `entity` field
    InvalidEntity { item: Value, reason: String },
    /// A relation item did not match the relation schema
    InvalidRelation { item: Value, reason: String },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::CallFailed { message } => write!(f, "Extraction failed: {}", message),
            ExtractionWarning::InvalidEntity { item, reason } => {
                write!(f, "Invalid entity {}: {}", item, reason)
            }
            ExtractionWarning::InvalidRelation { item, reason } => {
                write!(f, "Invalid relation {}: {}", item, reason)
            }
        }
    }
}

/// Result of entity extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityExtraction {
    /// Extracted entities, in model order, duplicates kept
    pub entities: Vec<String>,
    /// Entity -> type; `None` unless types were requested and the call succeeded
    pub entity_types: Option<HashMap<String, String>>,
    /// Problems encountered along the way
    pub warnings: Vec<ExtractionWarning>,
}

impl EntityExtraction {
    /// The empty result returned when the model call fails.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            entities: Vec::new(),
            entity_types: None,
            warnings: vec![ExtractionWarning::CallFailed {
                message: message.into(),
            }],
        }
    }

    /// Whether the model call itself failed.
    pub fn call_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ExtractionWarning::CallFailed { .. }))
    }
}

/// Result of relation extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelationExtraction {
    /// Kept relations, in model order
    pub relations: Vec<Triple>,
    /// Predicate -> type; `None` unless types were requested and the call succeeded
    pub edge_types: Option<HashMap<String, String>>,
    /// Problems encountered along the way
    pub warnings: Vec<ExtractionWarning>,
}

impl RelationExtraction {
    /// The empty result returned when the model call fails.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            relations: Vec::new(),
            edge_types: None,
            warnings: vec![ExtractionWarning::CallFailed {
                message: message.into(),
            }],
        }
    }

    /// Whether the model call itself failed.
    pub fn call_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ExtractionWarning::CallFailed { .. }))
    }
}

/// Few-shot example for entity extraction: text and the expected entity list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityExample {
    pub source_text: String,
    /// Expected entities, either plain strings or `{entity, type}` objects
    pub entities: Vec<Value>,
}

/// Few-shot example for relation extraction: text and the expected relations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationExample {
    pub source_text: String,
    /// Expected `{subject, predicate, object[, predicate_type]}` objects
    pub relations: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relation_schema() {
        let rel: Relation = serde_json::from_value(
            json!({"subject": "Alice", "predicate": "knows", "object": "Bob", "confidence": 0.9}),
        )
        .unwrap();
        assert_eq!(
            rel.into_triple(),
            ("Alice".into(), "knows".into(), "Bob".into())
        );

        assert!(
            serde_json::from_value::<Relation>(json!({"subject": "Alice", "predicate": "knows"}))
                .is_err()
        );
        assert!(
            serde_json::from_value::<Relation>(
                json!({"subject": "Alice", "predicate": 3, "object": "Bob"})
            )
            .is_err()
        );
    }

    #[test]
    fn test_relation_with_type_schema() {
        let rel: RelationWithType = serde_json::from_value(json!({
            "subject": "Alice", "predicate": "works_at", "object": "Acme",
            "predicate_type": "employment"
        }))
        .unwrap();
        assert_eq!(rel.relation.object, "Acme");
        assert_eq!(rel.predicate_type.as_deref(), Some("employment"));

        let rel: RelationWithType = serde_json::from_value(
            json!({"subject": "Alice", "predicate": "knows", "object": "Bob"}),
        )
        .unwrap();
        assert_eq!(rel.predicate_type, None);
    }

    #[test]
    fn test_warning_display() {
        let warning = ExtractionWarning::InvalidEntity {
            item: json!({"type": "Person"}),
            reason: "missing field `entity`".into(),
        };
        assert_eq!(
            warning.to_string(),
            r#"Invalid entity {"type":"Person"}: missing field `entity`"#
        );
    }
}
