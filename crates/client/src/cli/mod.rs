//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the itemsync API.
#[derive(Debug, Parser)]
#[command(name = "itemsync-client")]
#[command(about = "CLI client for the itemsync API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "ITEMSYNC_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Print the storage request instead of running it.
    #[arg(long)]
    pub explain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every item.
    List,
    /// Get every item with a title.
    GetByTitle {
        /// Exact title to match.
        title: String,
    },
    /// Get an item by id.
    Get {
        /// Item ID.
        id: String,
    },
    /// Add an item.
    Add {
        /// Item title.
        #[arg(long)]
        title: String,
        /// Item ID. Generated by the server when omitted.
        #[arg(long)]
        id: Option<String>,
        /// Extra attribute as key=value. Values are parsed as JSON when
        /// possible and kept as strings otherwise.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Check that the server is up.
    Livez,
}

/// Parses a `key=value` attribute.
pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in {raw:?}"));
    }
    if key == "id" || key == "title" {
        return Err(format!("use --{key} to set {key:?}"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
