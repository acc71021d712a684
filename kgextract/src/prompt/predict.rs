//! Single-call prediction over a signature.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::{PromptError, Result, Signature, extract_json};
use crate::lm::{CompletionParams, LanguageModel, Message};

/// A few-shot demonstration: field values keyed by field name.
///
/// A demo only needs to carry some of the signature's fields; inputs it lacks
/// are left out of the rendered example.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Demo {
    fields: Map<String, Value>,
}

impl Demo {
    /// Create an empty demonstration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Output fields returned by a successful prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    fields: Map<String, Value>,
}

impl Prediction {
    /// Get an output field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Take a list-valued output field, leaving `None` behind.
    pub fn take_list(&mut self, name: &str) -> Option<Vec<Value>> {
        match self.fields.remove(name) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }
    }
}

/// Predictor bound to a signature.
#[derive(Debug, Clone)]
pub struct Predict {
    signature: Signature,
    demos: Vec<Demo>,
    params: CompletionParams,
}

impl Predict {
    /// Create a predictor for `signature`.
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            demos: Vec::new(),
            params: CompletionParams::default(),
        }
    }

    /// Attach few-shot demonstrations.
    pub fn with_demos(mut self, demos: Vec<Demo>) -> Self {
        self.demos = demos;
        self
    }

    /// Override completion parameters.
    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    /// Render the chat messages for one call.
    pub fn messages(&self, inputs: &Map<String, Value>) -> Result<Vec<Message>> {
        for field in &self.signature.inputs {
            if !inputs.contains_key(&field.name) {
                return Err(PromptError::MissingInput(field.name.clone()));
            }
        }

        let mut messages = Vec::with_capacity(2 + self.demos.len() * 2);
        messages.push(Message::system(self.signature.system_prompt()));

        for demo in &self.demos {
            messages.push(Message::user(self.render_inputs(&demo.fields)));
            messages.push(Message::assistant(self.render_outputs(&demo.fields)));
        }

        messages.push(Message::user(self.render_inputs(inputs)));
        Ok(messages)
    }

    /// Make one model call and validate the reply against the output fields.
    #[instrument(skip(self, model, inputs), fields(model = model.name()))]
    pub async fn call(
        &self,
        model: &dyn LanguageModel,
        inputs: Map<String, Value>,
    ) -> Result<Prediction> {
        let messages = self.messages(&inputs)?;
        debug!(
            demos = self.demos.len(),
            "Calling model with {} messages",
            messages.len()
        );

        let reply = model.complete(&messages, &self.params).await?;
        self.parse_reply(&reply)
    }

    /// Validate a raw reply against the output fields.
    pub fn parse_reply(&self, reply: &str) -> Result<Prediction> {
        let mut object = match extract_json(reply) {
            Some(Value::Object(object)) => object,
            _ => return Err(PromptError::NoJson(snippet(reply))),
        };

        let mut fields = Map::new();
        for field in &self.signature.outputs {
            let value = object
                .remove(&field.name)
                .ok_or_else(|| PromptError::MissingOutput(field.name.clone()))?;
            if !field.kind.accepts(&value) {
                return Err(PromptError::OutputType {
                    field: field.name.clone(),
                    expected: field.kind.type_hint(),
                });
            }
            fields.insert(field.name.clone(), value);
        }

        Ok(Prediction { fields })
    }

    fn render_inputs(&self, values: &Map<String, Value>) -> String {
        let sections = self
            .signature
            .inputs
            .iter()
            .filter_map(|field| {
                values
                    .get(&field.name)
                    .map(|value| format!("[[ ## {} ## ]]\n{}", field.name, render_value(value)))
            })
            .collect::<Vec<_>>();

        format!(
            "{}\n\nRespond with the JSON object for the output fields.",
            sections.join("\n\n")
        )
    }

    fn render_outputs(&self, values: &Map<String, Value>) -> String {
        let object = self
            .signature
            .outputs
            .iter()
            .filter_map(|field| {
                values
                    .get(&field.name)
                    .map(|value| (field.name.clone(), value.clone()))
            })
            .collect::<Map<String, Value>>();

        Value::Object(object).to_string()
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn snippet(reply: &str) -> String {
    const MAX: usize = 200;
    match reply.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &reply[..idx]),
        None => reply.to_string(),
    }
}
