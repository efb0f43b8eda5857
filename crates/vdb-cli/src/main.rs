//! Vector-database recipes
//!
//! Runs canned queries, manages the schema and batch-imports datasets
//! under deterministic object ids.
//!
//! # Usage
//!
//! ```bash
//! vdb recipes
//! vdb --readonly-demo run jeopardy-near-text
//! vdb schema create jeopardy
//! vdb import jeopardy ./jeopardy_100.json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/vdb-recipes/config.toml)
//! 3. File given with `--config`
//! 4. Environment variables (WEAVIATE_*, OPENAI_APIKEY)
//! 5. `--readonly-demo` preset
//! 6. CLI flags (`--host`, `--scheme`, `--log-level`)

use anyhow::Result;
use clap::Parser;

use vdb_cli::{
    build_client, derive_ids, handle_import, handle_object, handle_schema, init_logging,
    list_recipes, load_settings, run_query, run_recipe, show_meta, Cli, Commands, Printer,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer {
        compact: cli.compact,
    };
    let mut out = std::io::stdout().lock();

    // Offline commands need neither config nor a client
    match &cli.command {
        Commands::Recipes => return list_recipes(&mut out),
        Commands::DeriveId { keys } => return derive_ids(keys, &mut out),
        _ => {}
    }

    let settings = load_settings(&cli)?;
    init_logging(&settings.log_level)?;
    let client = build_client(&settings)?;

    match cli.command {
        Commands::Run { recipe } => {
            run_recipe(&client, &recipe, printer, &mut out).await?;
        }
        Commands::Query { file, document } => {
            run_query(
                &client,
                file.as_deref(),
                document.as_deref(),
                printer,
                &mut out,
            )
            .await?;
        }
        Commands::Schema { command } => {
            handle_schema(&client, command, printer, &mut out).await?;
        }
        Commands::Import { command } => {
            handle_import(&client, &settings, command, &mut out).await?;
        }
        Commands::Object { command } => {
            handle_object(&client, command, printer, &mut out).await?;
        }
        Commands::Meta => {
            show_meta(&client, printer, &mut out).await?;
        }
        Commands::Recipes | Commands::DeriveId { .. } => {}
    }

    Ok(())
}
