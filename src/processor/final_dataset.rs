use crate::models::{
    DateInput, FINAL_SCHEMA, SourceOption, StakeholderOption, UiField,
};
use crate::processor::alias_resolver::find_column;
use crate::processor::field_normalizers::{format_date, normalize_date, split_name};
use anyhow::{Result, bail};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

/// Header aliases used to pre-select a cleaned column for each output field.
/// Source of Data and Stakeholder Category are never auto-detected.
pub const UI_ALIASES: [(UiField, &[&str]); 8] = [
    (
        UiField::Name,
        &[
            "name of the teacher",
            "name of teacher",
            "name of participant",
            "name of the participant",
            "participant name",
            "teacher name",
            "name",
        ],
    ),
    (
        UiField::MobileNumber,
        &[
            "mobile",
            "phone",
            "phone number",
            "phone no",
            "contact",
            "contact number",
            "mobile/contact number",
        ],
    ),
    (UiField::Email, &["email", "email id", "email address"]),
    (
        UiField::InstituteName,
        &[
            "name of school",
            "name of the school",
            "school",
            "school/college",
            "college",
            "institution",
        ],
    ),
    (UiField::Board, &["board", "medium"]),
    (UiField::City, &["city", "district", "city/district"]),
    (UiField::State, &["state"]),
    (UiField::DateOfDataAddition, &["date", "timestamp", "registered"]),
];

fn ui_aliases(field: UiField) -> &'static [&'static str] {
    UI_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Where the values of one output field come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Column(String),
    Static(String),
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct FinalDatasetOptions {
    /// Explicit column choice per field; wins over auto-detection.
    pub overrides: HashMap<UiField, String>,
    pub source: Option<SourceOption>,
    pub stakeholder: Option<StakeholderOption>,
}

/// Projects a cleaned table onto the CRM-facing schema.
pub struct FinalDatasetBuilder {
    options: FinalDatasetOptions,
}

impl FinalDatasetBuilder {
    pub fn new(options: FinalDatasetOptions) -> Self {
        FinalDatasetBuilder { options }
    }

    /// Decide a source for every output field against the given headers.
    pub fn plan<S: AsRef<str>>(&self, headers: &[S]) -> Result<Vec<(UiField, FieldSource)>> {
        let mut plan = Vec::with_capacity(UiField::ALL.len());

        for field in UiField::ALL {
            let source = if let Some(column) = self.options.overrides.get(&field) {
                if !headers.iter().any(|h| h.as_ref() == column) {
                    bail!("Column '{}' chosen for {} does not exist", column, field.as_str());
                }
                FieldSource::Column(column.clone())
            } else if let Some(column) = find_column(headers, ui_aliases(field)) {
                FieldSource::Column(column.to_string())
            } else {
                self.static_choice(field)
                    .map(|value| FieldSource::Static(value.to_string()))
                    .unwrap_or(FieldSource::Empty)
            };

            plan.push((field, source));
        }

        Ok(plan)
    }

    fn static_choice(&self, field: UiField) -> Option<&'static str> {
        match field {
            UiField::SourceOfData => self.options.source.map(|s| s.as_str()),
            UiField::StakeholderCategory => self.options.stakeholder.map(|s| s.as_str()),
            _ => None,
        }
    }

    pub fn build(&self, cleaned: &DataFrame) -> Result<DataFrame> {
        let headers: Vec<String> = cleaned
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let height = cleaned.height();

        let mut values: HashMap<UiField, Vec<String>> = HashMap::new();
        for (field, source) in self.plan(&headers)? {
            let cells = match &source {
                FieldSource::Column(name) => {
                    info!("{} <- column '{}'", field.as_str(), name);
                    column_as_strings(cleaned, name)?
                }
                FieldSource::Static(value) => {
                    info!("{} <- static '{}'", field.as_str(), value);
                    vec![value.clone(); height]
                }
                FieldSource::Empty => {
                    warn!("No column found for {}, leaving it empty", field.as_str());
                    vec![String::new(); height]
                }
            };
            values.insert(field, cells);
        }

        let names = values.remove(&UiField::Name).unwrap_or_default();
        let (first_names, last_names): (Vec<String>, Vec<String>) =
            names.iter().map(|n| split_name(n)).unzip();

        let dates: Vec<String> = values
            .remove(&UiField::DateOfDataAddition)
            .unwrap_or_default()
            .iter()
            .map(|d| format_date(normalize_date(&DateInput::from(d.as_str()))))
            .collect();

        let mut columns: Vec<(&str, Vec<String>)> = vec![
            (FINAL_SCHEMA[0], first_names),
            (FINAL_SCHEMA[1], last_names),
        ];
        for field in [
            UiField::MobileNumber,
            UiField::Email,
            UiField::InstituteName,
            UiField::Board,
            UiField::City,
            UiField::State,
            UiField::SourceOfData,
            UiField::StakeholderCategory,
        ] {
            columns.push((field.as_str(), values.remove(&field).unwrap_or_default()));
        }
        columns.push((UiField::DateOfDataAddition.as_str(), dates));

        let keep = keep_last_by_key(&columns[2].1);
        let dropped = height - keep.len();
        if dropped > 0 {
            info!("Dropped {} rows sharing a Mobile Number", dropped);
        }

        let series: Vec<Column> = columns
            .into_iter()
            .map(|(name, cells)| {
                let kept: Vec<&str> = keep.iter().map(|&i| cells[i].as_str()).collect();
                Series::new(name.into(), kept).into()
            })
            .collect();

        Ok(DataFrame::new(series)?)
    }
}

impl Default for FinalDatasetBuilder {
    fn default() -> Self {
        Self::new(FinalDatasetOptions::default())
    }
}

/// Cell text of a column, nulls read as empty strings.
fn column_as_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|cell| cell.unwrap_or_default().to_string())
        .collect())
}

/// Row indices that survive deduplication on `keys`, keeping each key's last
/// occurrence and the original row order.
fn keep_last_by_key(keys: &[String]) -> Vec<usize> {
    let mut last: HashMap<&str, usize> = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        last.insert(key.as_str(), i);
    }

    keys.iter()
        .enumerate()
        .filter(|(i, key)| last.get(key.as_str()) == Some(i))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Name".into(), vec!["Asha Ramesh Patil", "Ravi", "Asha Patil"]).into(),
            Series::new("Phone Number".into(), vec!["9876543210", "9123456780", "9876543210"]).into(),
            Series::new("Phone_Valid".into(), vec!["Yes", "Yes", "Yes"]).into(),
            Series::new("Email ID".into(), vec!["asha@mail.com", "", "asha.p@mail.com"]).into(),
            Series::new("School/College".into(), vec!["Kendriya Vidyalaya", "", "Kendriya Vidyalaya"]).into(),
            Series::new("City/District".into(), vec!["Pune", "Nashik", "Pune"]).into(),
            Series::new("Timestamp".into(), vec!["15/03/2023", "2023-11-05 14:30:00", "bad"]).into(),
        ])
        .unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_plan_auto_detection() {
        let headers = ["Name", "Phone Number", "Phone_Valid", "Email ID", "Timestamp"];
        let plan = FinalDatasetBuilder::default().plan(&headers).unwrap();

        let source_of = |field: UiField| {
            plan.iter()
                .find(|(f, _)| *f == field)
                .map(|(_, s)| s.clone())
                .unwrap()
        };

        assert_eq!(source_of(UiField::MobileNumber), FieldSource::Column("Phone Number".into()));
        assert_eq!(source_of(UiField::Email), FieldSource::Column("Email ID".into()));
        assert_eq!(source_of(UiField::DateOfDataAddition), FieldSource::Column("Timestamp".into()));
        assert_eq!(source_of(UiField::Board), FieldSource::Empty);
        assert_eq!(source_of(UiField::SourceOfData), FieldSource::Empty);
    }

    #[test]
    fn test_override_must_exist() {
        let mut options = FinalDatasetOptions::default();
        options.overrides.insert(UiField::Board, "Medium Of Instruction".to_string());

        let builder = FinalDatasetBuilder::new(options);
        assert!(builder.plan(&["Name"]).is_err());
        assert!(builder.plan(&["Name", "Medium Of Instruction"]).is_ok());
    }

    #[test]
    fn test_build_final_dataset() {
        let options = FinalDatasetOptions {
            source: Some(SourceOption::Event),
            stakeholder: Some(StakeholderOption::Teacher),
            ..Default::default()
        };

        let df = FinalDatasetBuilder::new(options).build(&cleaned_frame()).unwrap();

        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, FINAL_SCHEMA.to_vec());

        // The first Asha row shares its mobile with the last one and is dropped.
        assert_eq!(df.height(), 2);
        assert_eq!(strings(&df, "First Name"), vec!["Ravi", "Asha"]);
        assert_eq!(strings(&df, "Last Name"), vec!["", "Patil"]);
        assert_eq!(strings(&df, "Email"), vec!["", "asha.p@mail.com"]);
        assert_eq!(strings(&df, "City"), vec!["Nashik", "Pune"]);
        assert_eq!(strings(&df, "Board"), vec!["", ""]);
        assert_eq!(strings(&df, "Source of Data"), vec!["Event", "Event"]);
        assert_eq!(strings(&df, "Stakeholder Category"), vec!["Teacher", "Teacher"]);
        assert_eq!(strings(&df, "Date of Data Addition"), vec!["2023-11-05", ""]);
    }

    #[test]
    fn test_keep_last_by_key() {
        let keys: Vec<String> = ["a", "b", "a", "", "c", ""].iter().map(|s| s.to_string()).collect();
        assert_eq!(keep_last_by_key(&keys), vec![1, 2, 4, 5]);
    }
}
