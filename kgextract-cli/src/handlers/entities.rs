//! Entity command handler

use crate::args::EntitiesArgs;
use crate::context::KgCliContext;
use crate::output::{print_entity_extraction, print_json};
use crate::utils::{entity_request, read_input};
use kgextract::extraction::get_entities;

pub async fn handle_entities_command(
    args: EntitiesArgs,
    ctx: &KgCliContext,
    output_format: &str,
) -> kgextract::Result<bool> {
    let text = read_input(&args.input.input)?;
    let request = entity_request(
        ctx.extractor.entity_request(),
        &args.types,
        args.examples.as_deref(),
        args.allow_untyped,
    )?;

    let result = get_entities(ctx.extractor.model(), &text, &request).await;

    if output_format == "json" {
        print_json(&result);
    } else {
        print_entity_extraction(&result);
    }

    Ok(!result.call_failed())
}
