//! # fixrec-cli
//!
//! Command-line checker for fixed-record data files.
//!
//! Lets data authors validate a file against its schema and inspect the
//! loaded records without writing any code.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fixrec_schema::{Container, Schema, SchemaDecl};
use fixrec_table::{RecordStore, Table};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fixrec")]
#[command(about = "Validate and inspect fixed-record data files")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a data file
    Check {
        /// Data file path
        file: String,

        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Print the loaded records as JSON
    Show {
        /// Data file path
        file: String,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Print only this record (keyed), field (singleton), or index (sequence)
        #[arg(short, long)]
        key: Option<String>,
    },
}

#[derive(Args)]
struct SchemaArgs {
    /// Schema declaration file (YAML)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Required fields, comma separated
    #[arg(short, long, value_delimiter = ',')]
    required: Vec<String>,

    /// Optional fields, comma separated
    #[arg(short, long, value_delimiter = ',')]
    optional: Vec<String>,

    /// The file holds a single mapping
    #[arg(long)]
    singleton: bool,

    /// Require a particular collection shape
    #[arg(long, value_enum)]
    container: Option<ContainerArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContainerArg {
    Sequence,
    Keyed,
}

impl SchemaArgs {
    /// Combine the declaration file (if any) with command-line fields
    fn into_schema(self) -> anyhow::Result<Schema> {
        let mut decl = match &self.schema {
            Some(path) => SchemaDecl::from_file(path)
                .with_context(|| format!("reading schema declaration {}", path.display()))?,
            None => SchemaDecl::default(),
        };

        decl.required.extend(self.required);
        decl.optional.extend(self.optional);
        decl.singleton |= self.singleton;
        if let Some(container) = self.container {
            decl.container = match container {
                ContainerArg::Sequence => Container::Sequence,
                ContainerArg::Keyed => Container::Keyed,
            };
        }

        Ok(decl.into_schema()?)
    }
}

fn check(file: String, schema: SchemaArgs) -> anyhow::Result<()> {
    let table = Table::new(file, schema.into_schema()?);
    let store = table.load()?;
    println!(
        "{}: ok ({}, {} record{})",
        table.name(),
        store.mode(),
        store.len(),
        if store.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn show(file: String, schema: SchemaArgs, key: Option<String>) -> anyhow::Result<()> {
    let table = Table::new(file, schema.into_schema()?);
    let store = table.load()?;

    let json = match (store, key) {
        (store, None) => serde_json::to_string_pretty(store)?,
        (RecordStore::Sequence(sequence), Some(key)) => {
            let index: usize = key
                .parse()
                .with_context(|| format!("'{key}' is not a record index"))?;
            match sequence.get(index) {
                Some(record) => serde_json::to_string_pretty(record)?,
                None => bail!("{}: no record at index {}", table.name(), index),
            }
        }
        (RecordStore::Keyed(keyed), Some(key)) => match keyed.get(&key) {
            Some(record) => serde_json::to_string_pretty(record)?,
            None => bail!("{}: no record with key '{}'", table.name(), key),
        },
        (RecordStore::Singleton(singleton), Some(key)) => match singleton.lookup(&key)? {
            Some(value) => serde_json::to_string_pretty(value)?,
            None => serde_json::to_string_pretty(&serde_json::Value::Null)?,
        },
    };

    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, schema } => {
            tracing::info!("Checking {}", file);
            check(file, schema)
        }
        Commands::Show { file, schema, key } => {
            tracing::info!("Showing {}", file);
            show(file, schema, key)
        }
    }
}
