//! Prompt signatures for entity and relation extraction.
//!
//! Each operation has one template, parameterized by whether types were
//! requested and whether the input is a conversation.

use crate::prompt::{Field, FieldKind, Signature};

const FAITHFULNESS: &str = "This is for an extraction task, please be thorough, accurate, and faithful to the reference text.";

/// Which of the four prompt variants to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureVariant {
    /// Allowed types were supplied
    pub typed: bool,
    /// The input is a conversation rather than plain text
    pub conversation: bool,
}

impl SignatureVariant {
    /// Select a variant from the two flags.
    pub fn new(typed: bool, conversation: bool) -> Self {
        Self {
            typed,
            conversation,
        }
    }
}

/// Signature for entity extraction.
pub fn entity_signature(variant: SignatureVariant) -> Signature {
    let task = match (variant.typed, variant.conversation) {
        (false, false) => {
            "Extract all entities from the source text. Extracted entities are subjects or objects."
        }
        (false, true) => {
            "Extract all entities from the conversation. Extracted entities are subjects or objects.\n\
             Consider both explicit entities and participants in the conversation."
        }
        (true, false) => {
            "Extract all entities from the source text and assign types to them. \
             Extracted entities are subjects or objects."
        }
        (true, true) => {
            "Extract all entities from the conversation and assign types to them. \
             Extracted entities are subjects or objects. \
             Consider both explicit entities and participants in the conversation."
        }
    };
    let instruction = format!("{}\n{}", task, FAITHFULNESS);

    let signature = Signature::new(instruction).input(Field::new("source_text", FieldKind::Str));

    if variant.typed {
        signature
            .input(
                Field::new("node_types", FieldKind::StrList)
                    .with_desc("List of allowed entity types"),
            )
            .input(
                Field::new("require_type", FieldKind::Bool)
                    .with_desc("Whether every entity must have a type from node_types"),
            )
            .output(Field::new("entities", FieldKind::DictList).with_desc(
                "List of entities with their types as {entity: str, type: str}. Be thorough",
            ))
    } else {
        signature.output(
            Field::new("entities", FieldKind::DictList)
                .with_desc("List of entities. Be thorough"),
        )
    }
}

/// Signature for relation extraction.
pub fn relation_signature(variant: SignatureVariant) -> Signature {
    let task = match (variant.typed, variant.conversation) {
        (false, false) => {
            "Extract subject-predicate-object triples from the source text. \
             Subject and object must be from entities list. \
             Entities provided were previously extracted from the same source text."
        }
        (false, true) => {
            "Extract subject-predicate-object triples from the conversation, including:\n\
             1. Relations between concepts discussed\n\
             2. Relations between speakers and concepts (e.g. user asks about X)\n\
             3. Relations between speakers (e.g. assistant responds to user)\n\
             Subject and object must be from entities list. \
             Entities provided were previously extracted from the same source text."
        }
        (true, false) => {
            "Extract subject-predicate-object triples from the source text and assign types to predicates. \
             Subject and object must be from entities list. \
             Entities provided were previously extracted from the same source text."
        }
        (true, true) => {
            "Extract subject-predicate-object triples from the conversation and assign types to predicates. \
             Include relations between concepts, speakers and concepts, and between speakers. \
             Subject and object must be from entities list."
        }
    };
    let instruction = format!("{}\n{}", task, FAITHFULNESS);

    let signature = Signature::new(instruction)
        .input(Field::new("source_text", FieldKind::Str))
        .input(Field::new("entities", FieldKind::StrList));

    let relations_desc = match (variant.typed, variant.conversation) {
        (true, _) => "List of subject-predicate-object tuples with predicate types. Be thorough",
        (false, true) => {
            "List of subject-predicate-object tuples where subject and object are exact matches \
             to items in entities list. Be thorough"
        }
        (false, false) => "List of subject-predicate-object tuples. Be thorough",
    };

    let signature = if variant.typed {
        signature
            .input(
                Field::new("edge_types", FieldKind::StrList)
                    .with_desc("List of allowed predicate types"),
            )
            .input(
                Field::new("require_type", FieldKind::Bool)
                    .with_desc("Whether every predicate must have a type from edge_types"),
            )
    } else {
        signature
    };

    signature.output(Field::new("relations", FieldKind::DictList).with_desc(relations_desc))
}
