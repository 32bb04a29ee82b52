use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use contact_pipeline::config::{AliasCollision, OutputFormat, PipelineConfig};
use contact_pipeline::models::{SourceOption, StakeholderOption, UiField};
use contact_pipeline::processor::{FinalDatasetBuilder, FinalDatasetOptions};
use contact_pipeline::storage::{read_untagged, write_csv};
use contact_pipeline::{CleaningPipeline, merge_rows};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "contact-pipeline")]
#[command(about = "Normalize and deduplicate contact spreadsheets")]
#[command(version = "0.1.0")]
struct Cli {
    /// Pipeline config file (overrides CONTACT_PIPELINE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean every CSV/Excel file in a folder into one table plus a summary
    Clean {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        #[arg(long)]
        max_passes: Option<usize>,
        #[arg(long, value_enum)]
        collision: Option<AliasCollision>,
    },
    /// Project a cleaned file onto the final CRM schema
    Finalize {
        /// Cleaned CSV or workbook
        input: PathBuf,
        #[arg(long, default_value = "final_cleaned_dataset.csv")]
        output: PathBuf,
        /// Static Source of Data for every row
        #[arg(long)]
        source: Option<SourceOption>,
        /// Static Stakeholder Category for every row
        #[arg(long)]
        stakeholder: Option<StakeholderOption>,
        /// Explicit column for a field, as FIELD=COLUMN (repeatable)
        #[arg(long = "map", value_name = "FIELD=COLUMN")]
        mappings: Vec<String>,
    },
    /// Append rows of another file below the final dataset
    Merge {
        final_file: PathBuf,
        append_file: PathBuf,
        #[arg(long, default_value = "combined_appended_dataset.csv")]
        output: PathBuf,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contact_pipeline=info")))
        .with(fmt::layer())
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(&path),
        None => PipelineConfig::load(),
    }
}

fn parse_mapping(raw: &str) -> Result<(UiField, String)> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected FIELD=COLUMN, got '{}'", raw))?;
    let field = field.parse::<UiField>().map_err(|e| anyhow!(e))?;
    Ok((field, column.trim().to_string()))
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            output,
            format,
            max_passes,
            collision,
        } => {
            let mut config = load_config(cli.config)?;
            if let Some(input) = input {
                config.input_folder = input;
            }
            if let Some(output) = output {
                config.output_folder = output;
            }
            if let Some(format) = format {
                config.output_format = format;
            }
            if let Some(max_passes) = max_passes {
                config.max_passes = max_passes;
            }
            if let Some(collision) = collision {
                config.alias_collision = collision;
            }
            config.validate()?;

            info!("🚀 Starting contact cleaning from {}", config.input_folder.display());
            let summary = CleaningPipeline::from_config(&config).run_batch(&config)?;

            println!("\n📊 Data quality summary:");
            println!("   Original rows: {}", summary.original_rows);
            println!("   Rows after deduplication: {}", summary.rows_after_dedup);
        }
        Commands::Finalize {
            input,
            output,
            source,
            stakeholder,
            mappings,
        } => {
            let mut options = FinalDatasetOptions {
                source,
                stakeholder,
                ..Default::default()
            };
            for raw in &mappings {
                let (field, column) = parse_mapping(raw)?;
                options.overrides.insert(field, column);
            }

            let cleaned = read_untagged(&input)
                .with_context(|| format!("Failed to read cleaned file {}", input.display()))?;
            let mut final_df = FinalDatasetBuilder::new(options).build(&cleaned)?;
            write_csv(&mut final_df, &output)?;

            println!("✅ Final dataset ready: {} rows -> {}", final_df.height(), output.display());
        }
        Commands::Merge {
            final_file,
            append_file,
            output,
        } => {
            let final_df = read_untagged(&final_file)
                .with_context(|| format!("Failed to read {}", final_file.display()))?;
            let append = read_untagged(&append_file)
                .with_context(|| format!("Failed to read {}", append_file.display()))?;

            let (mut combined, report) = merge_rows(&final_df, &append)?;
            write_csv(&mut combined, &output)?;

            if !report.missing.is_empty() {
                println!("⚠️  Created empty: {}", report.missing.join(", "));
            }
            if !report.extra.is_empty() {
                println!("⚠️  Retained extra: {}", report.extra.join(", "));
            }
            println!("✅ Total rows: {} -> {}", combined.height(), output.display());
        }
    }

    Ok(())
}
