pub mod cli;
pub mod toml_config;

use crate::core::batch::{DEFAULT_CHUNK_SIZE, DEFAULT_LENGTH_THRESHOLD};
use crate::core::transport::{DEFAULT_BASE_URL, DEFAULT_CONTENT_TYPE};
use crate::core::{ConfigProvider, Resource, SortKey};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// Resolved client and dump settings, whatever source they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub content_type: String,
    pub chunk_size: usize,
    pub length_threshold: usize,
    pub timeout_seconds: Option<u64>,
    pub pass_through_not_found: bool,
    pub output_path: String,
    pub resources: Vec<Resource>,
    pub sort_by: Option<SortKey>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            length_threshold: DEFAULT_LENGTH_THRESHOLD,
            timeout_seconds: None,
            pass_through_not_found: true,
            output_path: "./dump".to_string(),
            resources: Resource::ALL.to_vec(),
            sort_by: None,
        }
    }
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn length_threshold(&self) -> usize {
        self.length_threshold
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn pass_through_not_found(&self) -> bool {
        self.pass_through_not_found
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("content_type", &self.content_type)?;
        validation::validate_positive_number("chunk_size", self.chunk_size, 1)?;
        validation::validate_positive_number("length_threshold", self.length_threshold, 1)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 3600)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "flyff-dump")]
#[command(about = "Dump Flyff game data to JSON files")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory the JSON files are written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Resources to dump (default: all)
    #[arg(long, value_delimiter = ',')]
    pub resources: Vec<String>,

    /// Sort dumped entries by this field (id or level)
    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long)]
    pub chunk_size: Option<usize>,

    #[arg(long)]
    pub length_threshold: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show what would be dumped without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file if one was given, then applies command-line overrides.
    pub fn resolve(&self) -> Result<ClientSettings> {
        let mut settings = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?.to_settings()?,
            None => ClientSettings::default(),
        };

        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if !self.resources.is_empty() {
            settings.resources = self
                .resources
                .iter()
                .map(|name| name.parse())
                .collect::<Result<Vec<Resource>>>()?;
        }
        if let Some(sort_by) = &self.sort_by {
            settings.sort_by = Some(sort_by.parse()?);
        }
        if let Some(chunk_size) = self.chunk_size {
            settings.chunk_size = chunk_size;
        }
        if let Some(length_threshold) = self.length_threshold {
            settings.length_threshold = length_threshold;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = Some(timeout);
        }

        Ok(settings)
    }
}
