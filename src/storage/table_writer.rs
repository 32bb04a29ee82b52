use crate::config::OutputFormat;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

pub fn write_table(df: &mut DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output folder {}", parent.display()))?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    match format {
        OutputFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("Failed to write CSV {}", path.display()))?;
        }
        OutputFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet {}", path.display()))?;
        }
    }

    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    write_table(df, path, OutputFormat::Csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_creates_folder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("cleaned.csv");

        let mut df = DataFrame::new(vec![
            Series::new("Name".into(), vec![Some("Asha"), None]).into(),
            Series::new("City".into(), vec!["Pune", "Nashik"]).into(),
        ])
        .unwrap();

        write_csv(&mut df, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Name,City\nAsha,Pune\n,Nashik\n");
    }

    #[test]
    fn test_write_parquet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cleaned.parquet");

        let mut df = DataFrame::new(vec![Series::new("Name".into(), vec!["Asha"]).into()]).unwrap();
        write_table(&mut df, &path, OutputFormat::Parquet).unwrap();

        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
