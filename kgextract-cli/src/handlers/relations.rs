//! Relation command handler

use crate::args::RelationsArgs;
use crate::context::KgCliContext;
use crate::output::{print_json, print_relation_extraction};
use crate::utils::{read_input, relation_request};
use kgextract::extraction::get_relations;

pub async fn handle_relations_command(
    args: RelationsArgs,
    ctx: &KgCliContext,
    output_format: &str,
) -> kgextract::Result<bool> {
    let text = read_input(&args.input.input)?;
    let request = relation_request(
        ctx.extractor.relation_request(),
        &args.types,
        args.examples.as_deref(),
        args.allow_untyped,
    )?;

    let result = get_relations(ctx.extractor.model(), &text, &args.entities, &request).await;

    if output_format == "json" {
        print_json(&result);
    } else {
        print_relation_extraction(&result);
    }

    Ok(!result.call_failed())
}
