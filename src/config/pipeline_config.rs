use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the TOML file to load.
pub const CONFIG_PATH_VAR: &str = "CONTACT_PIPELINE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "src/configs/pipeline.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfigFile {
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Csv,
    Parquet,
}

/// How a raw header matched by several canonical fields is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AliasCollision {
    /// Fields claim headers in declaration order; a claimed header is skipped.
    FirstClaim,
    /// Every field scans all headers; the last field to match a header names it.
    LastWins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub cleaned_file_name: String,
    pub summary_file_name: String,
    pub output_format: OutputFormat,
    pub max_passes: usize,
    pub min_first_word_len: usize,
    pub alias_collision: AliasCollision,
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config file: {}", path.display()))?;

        let config_file: PipelineConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse pipeline config file: {}", path.display()))?;

        let config = config_file.pipeline;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config path from the environment and load it, falling
    /// back to defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            warn!("Pipeline config not found at {}, using defaults", path);
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn cleaned_output_path(&self) -> PathBuf {
        let path = self.output_folder.join(&self.cleaned_file_name);
        match self.output_format {
            OutputFormat::Csv => path,
            OutputFormat::Parquet => path.with_extension("parquet"),
        }
    }

    pub fn summary_output_path(&self) -> PathBuf {
        self.output_folder.join(&self.summary_file_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_passes == 0 {
            return Err(anyhow::anyhow!("max_passes must be at least 1"));
        }

        if self.cleaned_file_name.trim().is_empty() {
            return Err(anyhow::anyhow!("cleaned_file_name cannot be empty"));
        }

        if self.summary_file_name.trim().is_empty() {
            return Err(anyhow::anyhow!("summary_file_name cannot be empty"));
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("input_files"),
            output_folder: PathBuf::from("output_phase1"),
            cleaned_file_name: "reviews_cleaned.csv".to_string(),
            summary_file_name: "data_quality_summary.csv".to_string(),
            output_format: OutputFormat::Csv,
            max_passes: 6,
            min_first_word_len: 3,
            alias_collision: AliasCollision::FirstClaim,
        }
    }
}
