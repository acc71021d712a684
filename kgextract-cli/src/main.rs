use clap::Parser;
use is_terminal::IsTerminal;
use kgextract::config::LogLevel;
use kgextract_cli::handlers::{
    handle_entities_command, handle_extract_command, handle_relations_command,
};
use kgextract_cli::{Cli, Commands, KgCliContext, load_config, output_error_json};
use serde_json::json;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();
    let output_format = cli_args.output.clone();

    // Piped output stays free of escape codes
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli_args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            output_error_json(&e, &output_format);
            std::process::exit(1);
        }
    }
}

async fn run(cli_args: Cli) -> kgextract::Result<bool> {
    let output_format = cli_args.output.clone();

    if let Commands::Version = cli_args.command {
        if cli_args.json_output() {
            println!(
                "{}",
                json!({ "name": "kgextract-cli", "version": kgextract::VERSION })
            );
        } else {
            println!("kgextract CLI v{}", kgextract::VERSION);
        }
        return Ok(true);
    }

    let config = load_config(cli_args.config.as_deref(), cli_args.conversation)?;

    let mut logging = config.logging.clone();
    match cli_args.forced_log_level() {
        Some(level) => kgextract::logging::init_with_level(&logging, level)?,
        None => {
            // Warnings only by default, RUST_LOG still applies
            logging.level = LogLevel::Warn;
            kgextract::logging::init(&logging)?;
        }
    }

    let ctx = KgCliContext::new(config)?;
    debug!(
        model = ctx.extractor.model().name(),
        conversation = ctx.config.extraction.is_conversation,
        "CLI context ready"
    );

    match cli_args.command {
        Commands::Version => Ok(true),
        Commands::Entities(args) => handle_entities_command(args, &ctx, &output_format).await,
        Commands::Relations(args) => handle_relations_command(args, &ctx, &output_format).await,
        Commands::Extract(args) => handle_extract_command(args, &ctx, &output_format).await,
    }
}
