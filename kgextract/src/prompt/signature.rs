//! Declarative prompt signatures: an instruction plus typed input and output fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON shape a field carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain string
    Str,
    /// A list of strings
    StrList,
    /// A boolean flag
    Bool,
    /// A list of JSON objects
    DictList,
}

impl FieldKind {
    /// Type hint shown to the model.
    pub fn type_hint(&self) -> &'static str {
        match self {
            FieldKind::Str => "str",
            FieldKind::StrList => "list[str]",
            FieldKind::Bool => "bool",
            FieldKind::DictList => "list[dict]",
        }
    }

    /// Whether `value` has the right top-level shape for this kind.
    ///
    /// List element shapes are checked by the caller, one item at a time.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Str => value.is_string(),
            FieldKind::StrList | FieldKind::DictList => value.is_array(),
            FieldKind::Bool => value.is_boolean(),
        }
    }
}

/// A named input or output field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    /// Field name, used as the JSON key
    pub name: String,
    /// Expected shape
    pub kind: FieldKind,
    /// Optional description shown to the model
    pub desc: Option<String>,
}

impl Field {
    /// Create a field without a description.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            desc: None,
        }
    }

    /// Attach a description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    fn describe(&self, index: usize) -> String {
        match &self.desc {
            Some(desc) => format!(
                "{}. `{}` ({}): {}",
                index + 1,
                self.name,
                self.kind.type_hint(),
                desc
            ),
            None => format!("{}. `{}` ({})", index + 1, self.name, self.kind.type_hint()),
        }
    }
}

/// Instruction plus the fields going into and coming out of a model call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signature {
    /// Task instruction
    pub instruction: String,
    /// Fields supplied by the caller
    pub inputs: Vec<Field>,
    /// Fields the model must return
    pub outputs: Vec<Field>,
}

impl Signature {
    /// Create a signature with no fields.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input field.
    pub fn input(mut self, field: Field) -> Self {
        self.inputs.push(field);
        self
    }

    /// Add an output field.
    pub fn output(mut self, field: Field) -> Self {
        self.outputs.push(field);
        self
    }

    /// Render the system message describing the task and the reply contract.
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("Your input fields are:\n");
        for (i, field) in self.inputs.iter().enumerate() {
            prompt.push_str(&field.describe(i));
            prompt.push('\n');
        }

        prompt.push_str("Your output fields are:\n");
        for (i, field) in self.outputs.iter().enumerate() {
            prompt.push_str(&field.describe(i));
            prompt.push('\n');
        }

        let keys = self
            .outputs
            .iter()
            .map(|f| format!("`{}`", f.name))
            .collect::<Vec<_>>()
            .join(", ");

        prompt.push_str(&format!(
            "\nRespond with a single JSON object whose keys are exactly: {}. \
             Do not include any text outside the JSON object.\n\n",
            keys
        ));

        prompt.push_str("In adhering to this structure, your objective is:\n");
        for line in self.instruction.lines() {
            prompt.push_str("        ");
            prompt.push_str(line.trim());
            prompt.push('\n');
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_accepts() {
        assert!(FieldKind::Str.accepts(&json!("text")));
        assert!(!FieldKind::Str.accepts(&json!(["text"])));
        assert!(FieldKind::DictList.accepts(&json!([{"entity": "A"}, "B"])));
        assert!(!FieldKind::DictList.accepts(&json!({"entity": "A"})));
        assert!(FieldKind::Bool.accepts(&json!(true)));
    }

    #[test]
    fn test_system_prompt_lists_fields() {
        let signature = Signature::new("Extract things.\nBe thorough.")
            .input(Field::new("source_text", FieldKind::Str))
            .output(Field::new("things", FieldKind::DictList).with_desc("List of things"));

        let prompt = signature.system_prompt();
        assert!(prompt.contains("1. `source_text` (str)\n"));
        assert!(prompt.contains("1. `things` (list[dict]): List of things"));
        assert!(prompt.contains("keys are exactly: `things`"));
        assert!(prompt.contains("Extract things.\n"));
        assert!(prompt.contains("Be thorough.\n"));
    }
}
