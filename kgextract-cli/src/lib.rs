pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use commands::{Cli, Commands};
pub use context::{KgCliContext, load_config};
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error_json,
    print_entity_extraction, print_graph, print_relation_extraction,
};
pub use utils::{entity_request, load_examples, read_input, relation_request};
