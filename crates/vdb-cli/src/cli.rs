//! CLI argument parsing for `vdb`.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand, ValueEnum};

/// Vector-database recipes
///
/// Runs canned queries, manages the schema and imports the Jeopardy
/// datasets under deterministic object ids.
#[derive(Parser, Debug)]
#[command(name = "vdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/vdb-recipes/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override service host, e.g. localhost:8080
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Override URL scheme (http or https)
    #[arg(long, global = true)]
    pub scheme: Option<String>,

    /// Use the public read-only demo instance
    #[arg(long, global = true)]
    pub readonly_demo: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the canned query recipes
    Recipes,

    /// Run a canned query recipe
    Run {
        /// Recipe name (see `vdb recipes`)
        recipe: String,
    },

    /// Run an arbitrary GraphQL document
    Query {
        /// Read the document from a file
        #[arg(short, long, conflicts_with = "document")]
        file: Option<String>,

        /// Inline GraphQL document
        #[arg(required_unless_present = "file")]
        document: Option<String>,
    },

    /// Schema management
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Batch import datasets
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },

    /// Create or delete single objects
    Object {
        #[command(subcommand)]
        command: ObjectCommands,
    },

    /// Print server metadata
    Meta,

    /// Print the object id derived from each key
    DeriveId {
        /// Natural keys, e.g. question texts
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

/// Predefined class definitions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPreset {
    /// JeopardyQuestion (round, value, question, answer)
    Jeopardy,
    /// Question, with generative search enabled
    Question,
    /// Article (title, body, url)
    Article,
}

/// Schema subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SchemaCommands {
    /// Print the full schema
    Get,

    /// Create a predefined class
    Create {
        #[arg(value_enum)]
        preset: ClassPreset,
    },

    /// Delete a class and all its objects
    Delete {
        /// Class name
        class: String,
    },
}

/// Import subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ImportCommands {
    /// Import jeopardy_100.json into JeopardyQuestion
    Jeopardy {
        /// Path to the dataset
        #[arg(default_value = "./jeopardy_100.json")]
        file: String,

        /// Objects per batch request (default from config)
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Download the quickstart dataset and import it into Question
    Tutorial {
        /// Dataset URL
        #[arg(long, default_value = vdb_types::dataset::TUTORIAL_DATASET_URL)]
        url: String,

        /// Read a local copy of the dataset instead of downloading it
        #[arg(short, long)]
        file: Option<String>,

        /// Objects per batch request (default from config)
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Import generated sample articles into Article
    Articles {
        /// Number of articles
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },
}

/// Object subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ObjectCommands {
    /// Create an object
    Create {
        /// Class name
        class: String,

        /// Property as key=value; values that parse as JSON keep their type
        #[arg(short, long = "prop", value_name = "KEY=VALUE")]
        props: Vec<String>,

        /// Derive the object id from this natural key
        #[arg(long, conflicts_with = "id")]
        derive_id: Option<String>,

        /// Explicit object id
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete an object
    Delete {
        /// Class name
        class: String,

        /// Object id
        id: String,
    },
}
