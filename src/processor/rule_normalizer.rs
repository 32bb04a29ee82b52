use crate::config::PipelineConfig;
use crate::models::{CanonicalField, Checked, EMAIL_VALID_COLUMN, PHONE_VALID_COLUMN};
use crate::processor::field_normalizers::{clean_email, clean_phone, normalize_text};
use crate::processor::location_stripper::drop_trailing_location;
use crate::processor::place_standardizer::PlaceStandardizer;
use crate::processor::school_standardizer::SchoolStandardizer;
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

/// Applies the per-field cleaning rules to canonical columns. Columns that
/// are absent are skipped; null cells stay null.
pub struct RuleNormalizer {
    schools: SchoolStandardizer,
    places: PlaceStandardizer,
}

impl RuleNormalizer {
    pub fn new(schools: SchoolStandardizer, places: PlaceStandardizer) -> Self {
        RuleNormalizer { schools, places }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            SchoolStandardizer::new(config.max_passes),
            PlaceStandardizer::new(config.min_first_word_len),
        )
    }

    pub fn normalize_dataframe(&self, df: &mut DataFrame) -> Result<()> {
        self.normalize_string_column(df, CanonicalField::Name, normalize_text)?;

        self.normalize_string_column(df, CanonicalField::CityDistrict, |s| {
            self.places.standardize_city(&normalize_text(s))
        })?;

        self.normalize_string_column(df, CanonicalField::State, |s| {
            self.places.standardize_state(&normalize_text(s))
        })?;

        self.normalize_string_column(df, CanonicalField::SchoolCollege, |s| {
            drop_trailing_location(&self.schools.standardize(s))
        })?;

        self.normalize_checked_column(df, CanonicalField::PhoneNumber, PHONE_VALID_COLUMN, clean_phone)?;
        self.normalize_checked_column(df, CanonicalField::EmailId, EMAIL_VALID_COLUMN, clean_email)?;

        Ok(())
    }

    fn normalize_string_column<F>(&self, df: &mut DataFrame, field: CanonicalField, f: F) -> Result<()>
    where
        F: Fn(&str) -> String,
    {
        let name = field.as_str();
        let Ok(column) = df.column(name) else {
            return Ok(());
        };

        let column = column.cast(&DataType::String)?;
        let normalized: Vec<Option<String>> = column
            .str()?
            .into_iter()
            .map(|cell| cell.map(&f))
            .collect();

        df.with_column(Series::new(name.into(), normalized))?;
        debug!("Normalized column {}", name);

        Ok(())
    }

    /// Rewrites the value column and writes a Yes/No/blank flag column next
    /// to it.
    fn normalize_checked_column<F>(
        &self,
        df: &mut DataFrame,
        field: CanonicalField,
        flag_column: &str,
        f: F,
    ) -> Result<()>
    where
        F: Fn(&str) -> Checked,
    {
        let name = field.as_str();
        let Ok(column) = df.column(name) else {
            return Ok(());
        };

        let column = column.cast(&DataType::String)?;
        let cells = column.str()?;

        let mut values: Vec<Option<String>> = Vec::with_capacity(cells.len());
        let mut flags: Vec<String> = Vec::with_capacity(cells.len());

        for cell in cells.into_iter() {
            match cell {
                Some(raw) => {
                    let checked = f(raw);
                    flags.push(checked.flag().to_string());
                    values.push(Some(checked.value));
                }
                None => {
                    values.push(None);
                    flags.push(String::new());
                }
            }
        }

        df.with_column(Series::new(name.into(), values))?;
        df.with_column(Series::new(flag_column.into(), flags))?;
        debug!("Normalized column {} with validity flags in {}", name, flag_column);

        Ok(())
    }
}

impl Default for RuleNormalizer {
    fn default() -> Self {
        Self::new(SchoolStandardizer::default(), PlaceStandardizer::default())
    }
}
