//! `vdb` library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations
//! - `recipes`: Canned GraphQL queries

pub mod cli;
pub mod commands;
pub mod recipes;

pub use cli::{ClassPreset, Cli, Commands, ImportCommands, ObjectCommands, SchemaCommands};
pub use commands::{
    build_client, derive_ids, handle_import, handle_object, handle_schema, init_logging,
    list_recipes, load_settings, run_query, run_recipe, show_meta, Printer,
};
pub use recipes::{find_recipe, Recipe, RECIPES};
