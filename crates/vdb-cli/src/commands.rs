//! Command implementations for `vdb`.
//!
//! Handlers write their results to the given writer (stdout in the binary);
//! logs go to stderr so JSON output stays pipeable.

use std::fs;
use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use vdb_client::{ClientConfig, ImportOutcome, VectorDbClient};
use vdb_types::{
    article_class, derive_object_id, jeopardy_question_class, load_jeopardy_file,
    parse_tutorial_records, question_class, sample_articles, DataObject, ObjectId, Settings,
    TutorialRecord,
};

use crate::cli::{ClassPreset, Cli, ImportCommands, ObjectCommands, SchemaCommands};
use crate::recipes::{find_recipe, RECIPES};

/// JSON output style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    pub compact: bool,
}

impl Printer {
    pub fn print<T: Serialize + ?Sized>(&self, out: &mut impl Write, value: &T) -> Result<()> {
        let text = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        writeln!(out, "{text}")?;
        Ok(())
    }
}

/// Load configuration and apply CLI overrides.
///
/// Precedence: defaults -> config files -> env -> `--readonly-demo` -> flags.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.readonly_demo {
        settings.use_readonly_demo();
    }
    if let Some(host) = &cli.host {
        settings.host = host.clone();
    }
    if let Some(scheme) = &cli.scheme {
        settings.scheme = scheme.clone();
    }
    if let Some(log_level) = &cli.log_level {
        settings.log_level = log_level.clone();
    }

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

/// Initialize logging on stderr. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

pub fn build_client(settings: &Settings) -> Result<VectorDbClient> {
    info!(url = %settings.base_url(), "Using vector database");
    if settings.openai_api_key.is_none() {
        debug!("OPENAI_APIKEY not set; generative and OpenAI-vectorized queries will fail");
    }
    VectorDbClient::new(ClientConfig::from_settings(settings)).context("Failed to build client")
}

/// List recipe names with their class and description.
pub fn list_recipes(out: &mut impl Write) -> Result<()> {
    let width = RECIPES.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for recipe in RECIPES {
        writeln!(
            out,
            "{:width$}  [{}] {}",
            recipe.name,
            recipe.class,
            recipe.description,
            width = width
        )?;
    }
    Ok(())
}

pub async fn run_recipe(
    client: &VectorDbClient,
    name: &str,
    printer: Printer,
    out: &mut impl Write,
) -> Result<()> {
    let Some(recipe) = find_recipe(name) else {
        bail!("Unknown recipe '{name}' (run `vdb recipes` for the list)");
    };

    info!(recipe = recipe.name, class = recipe.class, "Running recipe");
    let response = client
        .graphql(recipe.query)
        .await
        .with_context(|| format!("Recipe '{}' failed", recipe.name))?;
    printer.print(out, &response)
}

pub async fn run_query(
    client: &VectorDbClient,
    file: Option<&str>,
    document: Option<&str>,
    printer: Printer,
    out: &mut impl Write,
) -> Result<()> {
    let query = match (file, document) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {path}"))?,
        (None, Some(document)) => document.to_string(),
        (None, None) => bail!("No GraphQL document given"),
    };

    let response = client.graphql(&query).await.context("Query failed")?;
    printer.print(out, &response)
}

pub async fn handle_schema(
    client: &VectorDbClient,
    command: SchemaCommands,
    printer: Printer,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        SchemaCommands::Get => {
            let schema = client.get_schema().await.context("Failed to get schema")?;
            printer.print(out, &schema)
        }
        SchemaCommands::Create { preset } => {
            let class = match preset {
                ClassPreset::Jeopardy => jeopardy_question_class(),
                ClassPreset::Question => question_class(),
                ClassPreset::Article => article_class(),
            };
            let created = client
                .create_class(&class)
                .await
                .with_context(|| format!("Failed to create class {}", class.class))?;
            printer.print(out, &created)
        }
        SchemaCommands::Delete { class } => {
            client
                .delete_class(&class)
                .await
                .with_context(|| format!("Failed to delete class {class}"))?;
            writeln!(out, "Deleted class {class}")?;
            Ok(())
        }
    }
}

pub async fn handle_import(
    client: &VectorDbClient,
    settings: &Settings,
    command: ImportCommands,
    out: &mut impl Write,
) -> Result<()> {
    let (objects, batch_size) = match command {
        ImportCommands::Jeopardy { file, batch_size } => {
            let records = load_jeopardy_file(&file)
                .with_context(|| format!("Failed to load dataset {file}"))?;
            let objects: Vec<DataObject> = records.iter().map(|r| r.to_object()).collect();
            (objects, batch_size)
        }
        ImportCommands::Tutorial {
            url,
            file,
            batch_size,
        } => {
            let records: Vec<TutorialRecord> = match file {
                Some(path) => {
                    let bytes = fs::read(&path)
                        .with_context(|| format!("Failed to read dataset {path}"))?;
                    parse_tutorial_records(&bytes)
                        .with_context(|| format!("Failed to parse dataset {path}"))?
                }
                None => client
                    .fetch_json(&url)
                    .await
                    .with_context(|| format!("Failed to download dataset {url}"))?,
            };
            let objects: Vec<DataObject> = records.iter().map(|r| r.to_object()).collect();
            (objects, batch_size)
        }
        ImportCommands::Articles { count } => (sample_articles(count), None),
    };

    let batch_size = batch_size.unwrap_or(settings.batch_size);
    info!(count = objects.len(), batch_size, "Importing objects");

    let outcome = client
        .import_objects(&objects, batch_size)
        .await
        .context("Batch import failed")?;

    report_import(&outcome, out)?;

    if outcome.summary.has_failures() {
        bail!(
            "{} of {} objects failed to import",
            outcome.summary.failed_objects(),
            objects.len()
        );
    }
    Ok(())
}

/// Print one line per imported object, followed by its errors.
fn report_import(outcome: &ImportOutcome, out: &mut impl Write) -> Result<()> {
    for (i, result) in outcome.results.iter().enumerate() {
        let id = result
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "index {i}: {id} lastUpdateTimeUnix: {}",
            result.last_update_time_unix.unwrap_or(0)
        )?;
        for message in result.error_messages() {
            writeln!(out, "error at index {i}: {message}")?;
        }
    }
    Ok(())
}

pub async fn handle_object(
    client: &VectorDbClient,
    command: ObjectCommands,
    printer: Printer,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ObjectCommands::Create {
            class,
            props,
            derive_id,
            id,
        } => {
            let mut object = DataObject::new(class);
            for prop in &props {
                let (key, value) = parse_property(prop)?;
                object = object.with_property(key, value);
            }
            if let Some(key) = derive_id {
                object = object.with_derived_id(&key);
            } else if let Some(id) = id {
                let id: ObjectId = id.parse()?;
                object = object.with_id(id);
            }

            let created = client
                .create_object(&object)
                .await
                .context("Failed to create object")?;
            printer.print(out, &created)
        }
        ObjectCommands::Delete { class, id } => {
            let id: ObjectId = id.parse()?;
            client
                .delete_object(&class, &id)
                .await
                .with_context(|| format!("Failed to delete {class}/{id}"))?;
            writeln!(out, "Deleted {class}/{id}")?;
            Ok(())
        }
    }
}

/// Parse `key=value`. Values that are valid JSON keep their type
/// (`count=3` is a number); anything else is a string.
pub fn parse_property(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Property '{raw}' must be KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Property '{raw}' has an empty key");
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub async fn show_meta(
    client: &VectorDbClient,
    printer: Printer,
    out: &mut impl Write,
) -> Result<()> {
    let meta = client.meta().await.context("Failed to get server metadata")?;
    printer.print(out, &meta)
}

/// Print `<id>  <key>` for each key.
pub fn derive_ids(keys: &[String], out: &mut impl Write) -> Result<()> {
    for key in keys {
        writeln!(out, "{}  {}", derive_object_id(key), key)?;
    }
    Ok(())
}
