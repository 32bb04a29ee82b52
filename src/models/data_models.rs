use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column tagging every loaded row with the file it came from.
pub const SOURCE_FILE_COLUMN: &str = "__source_file";
pub const PHONE_VALID_COLUMN: &str = "Phone_Valid";
pub const EMAIL_VALID_COLUMN: &str = "Email_Valid";

/// Canonical slots of the cleaning pipeline's working table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Name,
    PhoneNumber,
    EmailId,
    SchoolCollege,
    CityDistrict,
    State,
}

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::PhoneNumber => "Phone Number",
            CanonicalField::EmailId => "Email ID",
            CanonicalField::SchoolCollege => "School/College",
            CanonicalField::CityDistrict => "City/District",
            CanonicalField::State => "State",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of the CRM-facing final dataset, before the name split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiField {
    Name,
    MobileNumber,
    Email,
    InstituteName,
    Board,
    City,
    State,
    SourceOfData,
    StakeholderCategory,
    DateOfDataAddition,
}

impl UiField {
    pub const ALL: [UiField; 10] = [
        UiField::Name,
        UiField::MobileNumber,
        UiField::Email,
        UiField::InstituteName,
        UiField::Board,
        UiField::City,
        UiField::State,
        UiField::SourceOfData,
        UiField::StakeholderCategory,
        UiField::DateOfDataAddition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiField::Name => "Name",
            UiField::MobileNumber => "Mobile Number",
            UiField::Email => "Email",
            UiField::InstituteName => "Institute Name",
            UiField::Board => "Board",
            UiField::City => "City",
            UiField::State => "State",
            UiField::SourceOfData => "Source of Data",
            UiField::StakeholderCategory => "Stakeholder Category",
            UiField::DateOfDataAddition => "Date of Data Addition",
        }
    }
}

impl FromStr for UiField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiField::ALL
            .iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown output field: {}", s))
    }
}

/// Column order of the exported final dataset.
pub const FINAL_SCHEMA: [&str; 11] = [
    "First Name",
    "Last Name",
    "Mobile Number",
    "Email",
    "Institute Name",
    "Board",
    "City",
    "State",
    "Source of Data",
    "Stakeholder Category",
    "Date of Data Addition",
];

/// Structural sanity verdict attached to phone and email cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    Yes,
    No,
}

impl Validity {
    pub fn from_bool(valid: bool) -> Self {
        if valid { Validity::Yes } else { Validity::No }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Validity::Yes => "Yes",
            Validity::No => "No",
        }
    }
}

/// A cleaned value with its flag. Blank input carries no verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    pub value: String,
    pub validity: Option<Validity>,
}

impl Checked {
    pub fn flag(&self) -> &'static str {
        self.validity.map(|v| v.as_str()).unwrap_or("")
    }
}

/// Input to the date normalizer: either a value that is already a date or
/// free text that still has to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceOption {
    Event,
    SalesTeam,
    Retailer,
    Website,
    Form,
    Other,
}

impl SourceOption {
    pub const ALL: [SourceOption; 6] = [
        SourceOption::Event,
        SourceOption::SalesTeam,
        SourceOption::Retailer,
        SourceOption::Website,
        SourceOption::Form,
        SourceOption::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceOption::Event => "Event",
            SourceOption::SalesTeam => "Sales Team",
            SourceOption::Retailer => "Retailer",
            SourceOption::Website => "Website",
            SourceOption::Form => "Form",
            SourceOption::Other => "Other",
        }
    }
}

impl FromStr for SourceOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceOption::ALL
            .iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown source of data: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeholderOption {
    Teacher,
    School,
    Student,
    Retailer,
    Other,
}

impl StakeholderOption {
    pub const ALL: [StakeholderOption; 5] = [
        StakeholderOption::Teacher,
        StakeholderOption::School,
        StakeholderOption::Student,
        StakeholderOption::Retailer,
        StakeholderOption::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StakeholderOption::Teacher => "Teacher",
            StakeholderOption::School => "School",
            StakeholderOption::Student => "Student",
            StakeholderOption::Retailer => "Retailer",
            StakeholderOption::Other => "Other",
        }
    }
}

impl FromStr for StakeholderOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StakeholderOption::ALL
            .iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown stakeholder category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_parsing() {
        assert_eq!("sales team".parse::<SourceOption>().unwrap(), SourceOption::SalesTeam);
        assert_eq!(" Teacher ".parse::<StakeholderOption>().unwrap(), StakeholderOption::Teacher);
        assert!("Partner".parse::<SourceOption>().is_err());
        assert_eq!("institute name".parse::<UiField>().unwrap(), UiField::InstituteName);
    }

    #[test]
    fn test_validity_flag() {
        let blank = Checked { value: String::new(), validity: None };
        assert_eq!(blank.flag(), "");

        let ok = Checked { value: "9876543210".to_string(), validity: Some(Validity::from_bool(true)) };
        assert_eq!(ok.flag(), "Yes");
    }
}
