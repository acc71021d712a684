use colored::*;
use kgextract::KgError;
use kgextract::extraction::{
    EntityExtraction, ExtractionWarning, GraphExtraction, RelationExtraction, Triple,
};
use kgextract::lm::LmError;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn entity() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn predicate() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Output a KgError in structured JSON format
pub fn output_error_json(error: &KgError, output_format: &str) {
    if output_format != "json" {
        eprintln!("{}", format_error(&error.to_string()));
        return;
    }

    let (code, details) = match error {
        KgError::Configuration(_) => (
            "CONFIGURATION_ERROR",
            Some(json!({
                "hint": "Check kgextract.toml or KGEXTRACT_* environment variables"
            })),
        ),
        KgError::Logging(_) => ("LOGGING_ERROR", None),
        KgError::Model(LmError::Status { status, .. }) => {
            ("MODEL_ERROR", Some(json!({ "status": status })))
        }
        KgError::Model(LmError::Configuration(_)) => (
            "MODEL_CONFIGURATION_ERROR",
            Some(json!({
                "hint": "Set llm.api_key_env to a variable holding your API key"
            })),
        ),
        KgError::Model(_) => ("MODEL_ERROR", None),
        KgError::Prompt(_) => ("PROMPT_ERROR", None),
        KgError::Io(_) => ("IO_ERROR", None),
        KgError::InvalidInput(_) => ("INVALID_INPUT", None),
    };

    let mut error_response = error_body(code, &error.to_string());
    if let Some(details) = details {
        error_response["details"] = details;
    }

    eprintln!("{}", to_pretty_json(&error_response));
}

fn error_body(code: &str, message: &str) -> serde_json::Value {
    json!({
        "error": true,
        "code": code,
        "message": message,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn print_json<T: Serialize>(value: &T) {
    println!("{}", to_pretty_json(value));
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn print_entities(entities: &[String], entity_types: Option<&HashMap<String, String>>) {
    if entities.is_empty() {
        println!("{}", format_info("No entities found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Found {} entities:", entities.len()))
    );
    println!();

    match entity_types {
        Some(types) => {
            println!(
                "{:<40} {}",
                "Entity".color(CliColors::muted()).bold(),
                "Type".color(CliColors::muted()).bold()
            );
            println!("{}", "─".repeat(60).color(CliColors::muted()));
            for entity in entities {
                let entity_type = types.get(entity).map(String::as_str).unwrap_or("-");
                println!(
                    "{:<40} {}",
                    entity.color(CliColors::entity()),
                    entity_type.color(CliColors::accent())
                );
            }
        }
        None => {
            for entity in entities {
                println!("  • {}", entity.color(CliColors::entity()));
            }
        }
    }
}

pub fn print_relations(relations: &[Triple], edge_types: Option<&HashMap<String, String>>) {
    if relations.is_empty() {
        println!("{}", format_info("No relations found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Found {} relations:", relations.len()))
    );
    println!();

    for (subject, predicate, object) in relations {
        let predicate_type = edge_types
            .and_then(|types| types.get(predicate))
            .map(|t| format!(" ({})", t).color(CliColors::muted()).to_string())
            .unwrap_or_default();

        println!(
            "  {} {}{} {}",
            subject.color(CliColors::entity()),
            format!("─[{}]→", predicate).color(CliColors::predicate()),
            predicate_type,
            object.color(CliColors::entity())
        );
    }
}

pub fn print_warnings(warnings: &[ExtractionWarning]) {
    if warnings.is_empty() {
        return;
    }

    println!();
    for warning in warnings {
        println!("{}", format_warning(&warning.to_string()));
    }
}

pub fn print_entity_extraction(result: &EntityExtraction) {
    print_entities(&result.entities, result.entity_types.as_ref());
    print_warnings(&result.warnings);
}

pub fn print_relation_extraction(result: &RelationExtraction) {
    print_relations(&result.relations, result.edge_types.as_ref());
    print_warnings(&result.warnings);
}

pub fn print_graph(graph: &GraphExtraction) {
    println!("{}", "━━━ Entities ━━━".color(CliColors::accent()).bold());
    print_entities(&graph.entities, graph.entity_types.as_ref());
    println!();
    println!("{}", "━━━ Relations ━━━".color(CliColors::accent()).bold());
    print_relations(&graph.relations, graph.edge_types.as_ref());
    print_warnings(&graph.warnings);

    if graph.warnings.is_empty() {
        println!();
        println!("{}", format_success("Extraction complete"));
    }
}
