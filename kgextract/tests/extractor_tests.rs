mod common;

use common::{ScriptedModel, names};
use kgextract::config::{ConfigBuilder, ExtractionConfig};
use kgextract::extraction::{EntityRequest, Extractor, RelationRequest};
use kgextract::lm::LmError;
use std::sync::Arc;

fn typed_config() -> ExtractionConfig {
    ExtractionConfig {
        node_types: names(&["Person", "Organization"]),
        edge_types: names(&["EMPLOYMENT"]),
        ..ExtractionConfig::default()
    }
}

#[tokio::test]
async fn test_extract_chains_entities_into_relations() {
    let model = Arc::new(ScriptedModel::replying([
        r#"{"entities": [{"entity": "Alice", "type": "Person"}, {"entity": "Acme", "type": "Organization"}]}"#,
        r#"{"relations": [{"subject": "Alice", "predicate": "works at", "object": "Acme", "predicate_type": "EMPLOYMENT"}]}"#,
    ]));
    let extractor = Extractor::new(model.clone()).with_config(typed_config());

    let graph = extractor.extract("Alice works at Acme.").await;

    assert_eq!(graph.entities, names(&["Alice", "Acme"]));
    assert_eq!(graph.entity_types.as_ref().unwrap().len(), 2);
    assert_eq!(graph.relations.len(), 1);
    assert_eq!(
        graph.edge_types.unwrap().get("works at").map(String::as_str),
        Some("EMPLOYMENT")
    );
    assert!(graph.warnings.is_empty());

    assert_eq!(model.call_count(), 2);
    // relation prompt is given the entities found in the first call
    assert!(model.user_message(1).contains(r#"["Alice","Acme"]"#));
}

#[tokio::test]
async fn test_extract_skips_relations_without_entities() {
    let model = Arc::new(ScriptedModel::replying([r#"{"entities": []}"#]));
    let extractor = Extractor::new(model.clone());

    let graph = extractor.extract("Nothing to see.").await;

    assert!(graph.entities.is_empty());
    assert!(graph.relations.is_empty());
    assert!(graph.edge_types.is_none());
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_extract_reports_entity_failure() {
    let model = Arc::new(ScriptedModel::failing(LmError::http("timed out")));
    let extractor = Extractor::new(model.clone());

    let graph = extractor.extract("Alice works at Acme.").await;

    assert!(graph.entities.is_empty());
    assert_eq!(graph.warnings.len(), 1);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_extract_collects_warnings_from_both_steps() {
    let model = Arc::new(ScriptedModel::replying([
        r#"{"entities": [{"entity": "Alice", "type": "Person"}, {"type": "Organization"}]}"#,
        r#"{"relations": [{"subject": "Alice"}]}"#,
    ]));
    let extractor = Extractor::new(model.clone()).with_config(typed_config());

    let graph = extractor.extract("Alice.").await;

    assert_eq!(graph.entities, names(&["Alice"]));
    assert!(graph.relations.is_empty());
    assert_eq!(graph.warnings.len(), 2);
}

#[tokio::test]
async fn test_requests_follow_extraction_config() {
    let config = ConfigBuilder::testing()
        .with_conversation(true)
        .with_node_types(["Person"])
        .require_types(false, true)
        .build()
        .unwrap();
    let extractor = Extractor::new(Arc::new(ScriptedModel::default()))
        .with_config(config.extraction.clone());

    let entity_request = extractor.entity_request();
    assert!(entity_request.is_conversation);
    assert_eq!(entity_request.allowed_types().unwrap(), ["Person".to_string()]);
    assert!(!entity_request.require_node_type);

    let relation_request = extractor.relation_request();
    assert!(relation_request.is_conversation);
    assert!(relation_request.allowed_types().is_none());
    assert!(relation_request.require_edge_type);
}

#[tokio::test]
async fn test_extract_with_explicit_requests() {
    let model = Arc::new(ScriptedModel::replying([
        r#"{"entities": ["Alice", "Bob"]}"#,
        r#"{"relations": [{"subject": "Alice", "predicate": "knows", "object": "Bob"}]}"#,
    ]));
    let extractor = Extractor::new(model.clone()).with_config(typed_config());

    let graph = extractor
        .extract_with("Alice knows Bob.", &EntityRequest::new(), &RelationRequest::new())
        .await;

    assert!(graph.entity_types.is_none());
    assert!(graph.edge_types.is_none());
    assert_eq!(graph.relations.len(), 1);
    assert!(!model.user_message(0).contains("node_types"));
}
