use crate::models::SOURCE_FILE_COLUMN;
use calamine::{Data, DataType as _, Reader, open_workbook_auto};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Headers dropped on load in addition to empty ones. Flags from a previous
/// run are recomputed, so stale copies must not survive.
const STALE_FLAG_HEADERS: [&str; 2] = ["email_valid", "phone_valid"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no input files found in {0}")]
    NoInputFiles(PathBuf),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {0} has no worksheets")]
    EmptyWorkbook(PathBuf),

    #[error("failed to build table: {0}")]
    Frame(#[from] PolarsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Csv,
    Workbook,
}

fn table_kind(path: &Path) -> Option<TableKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if ext == "csv" {
        Some(TableKind::Csv)
    } else if ext.starts_with("xls") || ext == "ods" {
        Some(TableKind::Workbook)
    } else {
        None
    }
}

/// Spreadsheet files in `folder`: workbooks first, then CSVs, each group
/// sorted by file name.
pub fn discover_input_files(folder: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(folder).map_err(|source| LoadError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut workbooks = Vec::new();
    let mut csvs = Vec::new();

    for entry in entries {
        let path = entry
            .map_err(|source| LoadError::Io {
                path: folder.to_path_buf(),
                source,
            })?
            .path();

        if !path.is_file() {
            continue;
        }

        let is_xls_glob = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.to_lowercase().starts_with("xls"));

        match table_kind(&path) {
            Some(TableKind::Workbook) if is_xls_glob => workbooks.push(path),
            Some(TableKind::Csv) => csvs.push(path),
            _ => debug!("Skipping {}", path.display()),
        }
    }

    workbooks.sort();
    csvs.sort();
    workbooks.extend(csvs);

    if workbooks.is_empty() {
        return Err(LoadError::NoInputFiles(folder.to_path_buf()));
    }

    info!("Found {} input files in {}", workbooks.len(), folder.display());
    Ok(workbooks)
}

/// Load every file, stopping at the first one that fails.
pub fn load_tables(paths: &[PathBuf]) -> Result<Vec<DataFrame>, LoadError> {
    if paths.is_empty() {
        return Err(LoadError::NoInputFiles(PathBuf::new()));
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        match read_table(path) {
            Ok(df) => {
                info!("Loaded {} rows from {}", df.height(), path.display());
                tables.push(df);
            }
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                return Err(e);
            }
        }
    }

    Ok(tables)
}

/// Read one CSV or workbook into an all-`String` frame tagged with its file
/// name.
pub fn read_table(path: &Path) -> Result<DataFrame, LoadError> {
    let mut df = read_untagged(path)?;
    tag_source_file(&mut df, path)?;
    Ok(df)
}

/// Read one CSV or workbook without the source-file column.
pub fn read_untagged(path: &Path) -> Result<DataFrame, LoadError> {
    let (headers, rows) = match table_kind(path) {
        Some(TableKind::Csv) => read_csv_cells(path)?,
        Some(TableKind::Workbook) => read_workbook_cells(path)?,
        None => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    build_frame(headers, rows)
}

fn tag_source_file(df: &mut DataFrame, path: &Path) -> Result<(), LoadError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let tag = Series::new(SOURCE_FILE_COLUMN.into(), vec![file_name; df.height()]);
    df.with_column(tag)?;
    Ok(())
}

type Cells = (Vec<String>, Vec<Vec<Option<String>>>);

/// UTF-8 first; files that are not valid UTF-8 are read as Windows-1252.
fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text
            .strip_prefix('\u{feff}')
            .map(str::to_string)
            .unwrap_or(text),
        Err(e) => {
            warn!("{} is not valid UTF-8, decoding as Windows-1252", path.display());
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            text.into_owned()
        }
    }
}

fn read_csv_cells(path: &Path) -> Result<Cells, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(bytes, path);

    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row = (0..headers.len())
            .map(|i| record.get(i).filter(|v| !v.is_empty()).map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}

fn read_workbook_cells(path: &Path) -> Result<Cells, LoadError> {
    let workbook_error = |source| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(workbook_error)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .map(|row| row.iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();

    let rows = sheet_rows
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .map(|row| {
            (0..headers.len())
                .map(|i| row.get(i).and_then(cell_text))
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

/// Render a workbook cell as text. Whole floats lose their fraction so that
/// numbers typed into phone columns keep their digits.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

pub fn is_unwanted_column(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty() || STALE_FLAG_HEADERS.contains(&trimmed.to_lowercase().as_str())
}

/// Make headers unique the way spreadsheet tools do: `X`, `X.1`, `X.2`.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let mut candidate = header.clone();
        if used.contains(&candidate) {
            let n = counters.entry(header.clone()).or_insert(0);
            loop {
                *n += 1;
                candidate = format!("{}.{}", header, n);
                if !used.contains(&candidate) {
                    break;
                }
            }
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

fn build_frame(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<DataFrame, LoadError> {
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !is_unwanted_column(h))
        .map(|(i, _)| i)
        .collect();

    let dropped = headers.len() - keep.len();
    if dropped > 0 {
        info!("Dropped {} empty or stale flag columns", dropped);
    }

    let names = dedupe_headers(keep.iter().map(|&i| headers[i].clone()).collect());

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for (name, &i) in names.iter().zip(&keep) {
        let values: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.get(i).and_then(|v| v.as_deref()))
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_utf8_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "teachers.csv",
            "Name,Mobile,Phone_Valid,\nAsha,9876543210,Yes,x\nRavi,,No,\n".as_bytes(),
        );

        let df = read_table(&path).unwrap();

        assert_eq!(names(&df), vec!["Name", "Mobile", SOURCE_FILE_COLUMN]);
        assert_eq!(df.height(), 2);

        let mobile = df.column("Mobile").unwrap().str().unwrap();
        assert_eq!(mobile.get(0), Some("9876543210"));
        assert_eq!(mobile.get(1), None);

        let source = df.column(SOURCE_FILE_COLUMN).unwrap().str().unwrap();
        assert_eq!(source.get(1), Some("teachers.csv"));
    }

    #[test]
    fn test_read_windows_1252_csv() {
        let dir = TempDir::new().unwrap();
        // "José" with é as the single byte 0xE9.
        let path = write_file(&dir, "legacy.csv", b"Name,City\nJos\xe9,Pune\n");

        let df = read_table(&path).unwrap();
        let name = df.column("Name").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("José"));
    }

    #[test]
    fn test_duplicate_headers() {
        assert_eq!(
            dedupe_headers(vec!["Name".into(), "Name".into(), "Name.1".into(), "Name".into()]),
            vec!["Name", "Name.1", "Name.1.1", "Name.2"]
        );

        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "dup.csv", b"Email,Email\na@b.com,c@d.com\n");
        let df = read_table(&path).unwrap();
        assert_eq!(names(&df), vec!["Email", "Email.1", SOURCE_FILE_COLUMN]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ragged.csv", b"Name,City,State\nAsha,Pune\n");

        let df = read_table(&path).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("State").unwrap().str().unwrap().get(0), None);
    }

    #[test]
    fn test_discover_orders_workbooks_first() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.csv", b"Name\nx\n");
        write_file(&dir, "a.csv", b"Name\ny\n");
        write_file(&dir, "z.xlsx", b"");
        write_file(&dir, "notes.txt", b"ignored");

        let files = discover_input_files(dir.path()).unwrap();
        let file_names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(file_names, vec!["z.xlsx", "a.csv", "b.csv"]);
    }

    #[test]
    fn test_empty_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover_input_files(dir.path()),
            Err(LoadError::NoInputFiles(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "data.json", b"{}");
        assert!(matches!(read_table(&path), Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(9876543210.0)), Some("9876543210".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Int(42)), Some("42".to_string()));
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }
}
