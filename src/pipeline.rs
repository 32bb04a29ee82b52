use crate::config::PipelineConfig;
use crate::models::FINAL_SCHEMA;
use crate::processor::{AliasResolver, RuleNormalizer};
use crate::storage::{discover_input_files, load_tables, write_csv, write_table};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use tracing::{info, warn};

/// Row counts reported after a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualitySummary {
    pub original_rows: usize,
    pub rows_after_dedup: usize,
}

impl QualitySummary {
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        Ok(DataFrame::new(vec![
            Series::new("Original Rows".into(), vec![self.original_rows as u64]).into(),
            Series::new(
                "Rows After Deduplication".into(),
                vec![self.rows_after_dedup as u64],
            )
            .into(),
        ])?)
    }
}

pub struct CleaningPipeline {
    resolver: AliasResolver,
    normalizer: RuleNormalizer,
}

impl CleaningPipeline {
    pub fn new(resolver: AliasResolver, normalizer: RuleNormalizer) -> Self {
        CleaningPipeline { resolver, normalizer }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            AliasResolver::new(config.alias_collision),
            RuleNormalizer::from_config(config),
        )
    }

    /// Load, stack and clean the given files.
    pub fn run(&self, files: &[PathBuf]) -> Result<(DataFrame, QualitySummary)> {
        let tables = load_tables(files)?;
        let raw = concat_by_name(tables)?;
        self.clean_frame(raw)
    }

    /// Rename aliased columns, normalize every canonical field, then drop
    /// rows that are identical across all columns.
    pub fn clean_frame(&self, mut df: DataFrame) -> Result<(DataFrame, QualitySummary)> {
        let original_rows = df.height();
        info!("Cleaning {} rows across {} columns", original_rows, df.width());

        let bindings = self.resolver.map_to_canonical_schema(&mut df)?;
        info!("Mapped {} columns onto the canonical schema", bindings.len());

        self.normalizer.normalize_dataframe(&mut df)?;
        info!("Applied normalization rules");

        let clean = drop_duplicate_rows(&df)?;
        let summary = QualitySummary {
            original_rows,
            rows_after_dedup: clean.height(),
        };
        info!(
            "Deduplicated {} rows down to {}",
            summary.original_rows, summary.rows_after_dedup
        );

        Ok((clean, summary))
    }

    /// Folder-to-folder run: writes the cleaned table and the quality summary.
    pub fn run_batch(&self, config: &PipelineConfig) -> Result<QualitySummary> {
        let files = discover_input_files(&config.input_folder)?;
        let (mut clean, summary) = self.run(&files)?;

        let cleaned_path = config.cleaned_output_path();
        write_table(&mut clean, &cleaned_path, config.output_format)
            .context("Failed to write cleaned output")?;

        let summary_path = config.summary_output_path();
        write_csv(&mut summary.to_dataframe()?, &summary_path)
            .context("Failed to write quality summary")?;

        info!("✅ Cleaning completed: {}", cleaned_path.display());
        Ok(summary)
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(AliasResolver::default(), RuleNormalizer::default())
    }
}

/// Project `df` onto `columns` in that order, adding null `String` columns
/// for names it lacks.
fn align_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let height = df.height();
    let aligned: Vec<Column> = columns
        .iter()
        .map(|name| match df.column(name) {
            Ok(column) => column.cast(&DataType::String),
            Err(_) => Ok(Series::full_null(name.as_str().into(), height, &DataType::String).into()),
        })
        .collect::<PolarsResult<_>>()?;

    Ok(DataFrame::new(aligned)?)
}

/// Stack tables by column name. The result holds the union of all columns
/// in first-seen order; cells a table does not have are null.
pub fn concat_by_name(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for df in &frames {
        for name in df.get_column_names() {
            if seen.insert(name.to_string()) {
                columns.push(name.to_string());
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for df in &frames {
        let aligned = align_columns(df, &columns)?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }

    Ok(combined.unwrap_or_default())
}

/// Keep the first of every group of rows equal in all columns.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|c| c.cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;

    let cells: Vec<Vec<Option<&str>>> = columns
        .iter()
        .map(|c| -> Result<Vec<Option<&str>>> { Ok(c.str()?.into_iter().collect()) })
        .collect::<Result<_>>()?;

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut keep: Vec<IdxSize> = Vec::with_capacity(df.height());

    for row in 0..df.height() {
        let key: Vec<Option<&str>> = cells.iter().map(|column| column[row]).collect();
        if seen.insert(key) {
            keep.push(row as IdxSize);
        }
    }

    let indices = IdxCa::from_vec("idx".into(), keep);
    Ok(df.take(&indices)?)
}

/// Column differences found while appending a file to the final dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Final-schema columns the appended file lacked; created empty.
    pub missing: Vec<String>,
    /// Columns outside the final schema; kept.
    pub extra: Vec<String>,
}

/// Append `append` below `final_df`. The result keeps `final_df`'s column
/// order, followed by the columns only the appended side has, sorted.
pub fn merge_rows(final_df: &DataFrame, append: &DataFrame) -> Result<(DataFrame, MergeReport)> {
    let append_columns: HashSet<String> = append
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report = MergeReport {
        missing: FINAL_SCHEMA
            .iter()
            .filter(|c| !append_columns.contains(**c))
            .map(|c| c.to_string())
            .collect(),
        extra: append
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|c| !FINAL_SCHEMA.contains(&c.as_str()))
            .collect(),
    };

    if !report.missing.is_empty() {
        warn!("Missing columns in appended file (created empty): {:?}", report.missing);
    }
    if !report.extra.is_empty() {
        warn!("Extra columns in appended file (retained): {:?}", report.extra);
    }

    let mut append = append.clone();
    for name in &report.missing {
        let empty = Series::new(name.as_str().into(), vec![""; append.height()]);
        append.with_column(empty)?;
    }

    let mut columns: Vec<String> = final_df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let added: BTreeSet<String> = append_columns
        .into_iter()
        .chain(report.missing.iter().cloned())
        .filter(|c| !columns.contains(c))
        .collect();
    columns.extend(added);

    let mut combined = align_columns(final_df, &columns)?;
    combined.vstack_mut(&align_columns(&append, &columns)?)?;
    info!("Rows appended successfully. Total rows: {}", combined.height());

    Ok((combined, report))
}
