//! Configured extractor bundling a model with default request options.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use super::{
    EntityExtraction, EntityRequest, ExtractionWarning, RelationExtraction, RelationRequest,
    Triple, get_entities, get_relations,
};
use crate::config::{ExtractionConfig, KgConfig};
use crate::lm::{LanguageModel, build_model};

/// Entities and relations extracted from one input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphExtraction {
    pub entities: Vec<String>,
    pub entity_types: Option<HashMap<String, String>>,
    pub relations: Vec<Triple>,
    pub edge_types: Option<HashMap<String, String>>,
    /// Warnings from both steps, entity step first
    pub warnings: Vec<ExtractionWarning>,
}

/// Runs entity and relation extraction against one model.
#[derive(Debug, Clone)]
pub struct Extractor {
    model: Arc<dyn LanguageModel>,
    config: ExtractionConfig,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            config: ExtractionConfig::default(),
        }
    }

    /// Build the model and options from configuration.
    pub fn from_config(config: &KgConfig) -> crate::Result<Self> {
        let model: Arc<dyn LanguageModel> = Arc::from(build_model(&config.llm)?);
        Ok(Self::new(model).with_config(config.extraction.clone()))
    }

    /// Replace the default request options.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying model.
    pub fn model(&self) -> &dyn LanguageModel {
        self.model.as_ref()
    }

    /// Entity request pre-filled from configuration.
    pub fn entity_request(&self) -> EntityRequest {
        EntityRequest::new()
            .conversation(self.config.is_conversation)
            .with_node_types(self.config.node_types.clone())
            .require_node_type(self.config.require_node_type)
    }

    /// Relation request pre-filled from configuration.
    pub fn relation_request(&self) -> RelationRequest {
        RelationRequest::new()
            .conversation(self.config.is_conversation)
            .with_edge_types(self.config.edge_types.clone())
            .require_edge_type(self.config.require_edge_type)
    }

    /// Extract entities using the configured defaults.
    pub async fn entities(&self, input: &str) -> EntityExtraction {
        get_entities(self.model(), input, &self.entity_request()).await
    }

    /// Extract relations using the configured defaults.
    pub async fn relations(&self, input: &str, entities: &[String]) -> RelationExtraction {
        get_relations(self.model(), input, entities, &self.relation_request()).await
    }

    /// Run entity extraction, then relation extraction over its result.
    ///
    /// Relation extraction is skipped when no entities were found, since no
    /// relation could survive the endpoint check.
    #[instrument(skip(self, input), fields(model = self.model.name()))]
    pub async fn extract(&self, input: &str) -> GraphExtraction {
        self.extract_with(input, &self.entity_request(), &self.relation_request())
            .await
    }

    /// Like [`Extractor::extract`], with explicit requests.
    pub async fn extract_with(
        &self,
        input: &str,
        entity_request: &EntityRequest,
        relation_request: &RelationRequest,
    ) -> GraphExtraction {
        let entities = get_entities(self.model(), input, entity_request).await;
        let mut warnings = entities.warnings;

        if entities.entities.is_empty() {
            return GraphExtraction {
                entities: entities.entities,
                entity_types: entities.entity_types,
                relations: Vec::new(),
                edge_types: None,
                warnings,
            };
        }

        let relations =
            get_relations(self.model(), input, &entities.entities, relation_request).await;
        warnings.extend(relations.warnings);

        GraphExtraction {
            entities: entities.entities,
            entity_types: entities.entity_types,
            relations: relations.relations,
            edge_types: relations.edge_types,
            warnings,
        }
    }
}
