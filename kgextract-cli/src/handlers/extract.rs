//! Two-step extraction handler

use crate::args::ExtractArgs;
use crate::context::KgCliContext;
use crate::output::{print_graph, print_json};
use crate::utils::{entity_request, read_input, relation_request};
use kgextract::extraction::ExtractionWarning;

pub async fn handle_extract_command(
    args: ExtractArgs,
    ctx: &KgCliContext,
    output_format: &str,
) -> kgextract::Result<bool> {
    let text = read_input(&args.input.input)?;
    let entity_req = entity_request(
        ctx.extractor.entity_request(),
        &args.entity_types,
        args.entity_examples.as_deref(),
        args.allow_untyped,
    )?;
    let relation_req = relation_request(
        ctx.extractor.relation_request(),
        &args.relation_types,
        args.relation_examples.as_deref(),
        args.allow_untyped,
    )?;

    let graph = ctx
        .extractor
        .extract_with(&text, &entity_req, &relation_req)
        .await;

    if output_format == "json" {
        print_json(&graph);
    } else {
        print_graph(&graph);
    }

    let failed = graph
        .warnings
        .iter()
        .any(|w| matches!(w, ExtractionWarning::CallFailed { .. }));
    Ok(!failed)
}
