use crate::config::AliasCollision;
use crate::models::CanonicalField;
use anyhow::Result;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{info, warn};

/// Header aliases per canonical field, matched as lowercase substrings.
/// Resolution walks the fields in this order.
pub const COLUMN_ALIASES: [(CanonicalField, &[&str]); 6] = [
    (
        CanonicalField::Name,
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
        CanonicalField::PhoneNumber,
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
    (CanonicalField::EmailId, &["email", "email id", "email address"]),
    (
        CanonicalField::SchoolCollege,
        &[
            "name of school",
            "name of the school",
            "school",
            "school/college",
            "college",
            "institution",
        ],
    ),
    (CanonicalField::CityDistrict, &["city", "city/district", "district"]),
    (CanonicalField::State, &["state"]),
];

fn header_matches(header: &str, aliases: &[&str]) -> bool {
    let lower = header.to_lowercase();
    aliases.iter().any(|alias| lower.contains(alias))
}

/// First header (in table order) whose lowercase text contains any alias.
pub fn find_column<'a, S: AsRef<str>>(headers: &'a [S], aliases: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .map(|h| h.as_ref())
        .find(|header| header_matches(header, aliases))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub header: String,
    pub field: CanonicalField,
}

pub struct AliasResolver {
    aliases: Vec<(CanonicalField, Vec<&'static str>)>,
    collision: AliasCollision,
}

impl AliasResolver {
    pub fn new(collision: AliasCollision) -> Self {
        let aliases = COLUMN_ALIASES
            .iter()
            .map(|(field, list)| (*field, list.to_vec()))
            .collect();

        AliasResolver { aliases, collision }
    }

    /// Map raw headers onto canonical fields. Each header appears at most
    /// once in the result; unmatched headers are absent.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Vec<ColumnBinding> {
        match self.collision {
            AliasCollision::FirstClaim => self.resolve_first_claim(headers),
            AliasCollision::LastWins => self.resolve_last_wins(headers),
        }
    }

    fn resolve_first_claim<S: AsRef<str>>(&self, headers: &[S]) -> Vec<ColumnBinding> {
        let mut claimed: HashSet<&str> = HashSet::new();
        let mut bindings = Vec::new();

        for (field, aliases) in &self.aliases {
            let found = headers
                .iter()
                .map(|h| h.as_ref())
                .filter(|h| !claimed.contains(h))
                .find(|h| header_matches(h, aliases));

            if let Some(header) = found {
                claimed.insert(header);
                bindings.push(ColumnBinding {
                    header: header.to_string(),
                    field: *field,
                });
            }
        }

        bindings
    }

    fn resolve_last_wins<S: AsRef<str>>(&self, headers: &[S]) -> Vec<ColumnBinding> {
        let mut bindings: Vec<ColumnBinding> = Vec::new();

        for (field, aliases) in &self.aliases {
            if let Some(header) = find_column(headers, aliases) {
                if let Some(existing) = bindings.iter_mut().find(|b| b.header == header) {
                    existing.field = *field;
                } else {
                    bindings.push(ColumnBinding {
                        header: header.to_string(),
                        field: *field,
                    });
                }
            }
        }

        bindings
    }

    /// Rename detected columns in place and return the bindings applied.
    pub fn map_to_canonical_schema(&self, df: &mut DataFrame) -> Result<Vec<ColumnBinding>> {
        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut applied = Vec::new();

        for binding in self.resolve(&column_names) {
            let target = binding.field.as_str();
            if binding.header == target {
                applied.push(binding);
                continue;
            }

            if column_names.iter().any(|c| c == target) {
                warn!(
                    "Column '{}' matches {} but a column with that name already exists, leaving it as is",
                    binding.header, target
                );
                continue;
            }

            df.rename(&binding.header, target.into())?;
            info!("Detected column '{}' -> {}", binding.header, target);
            applied.push(binding);
        }

        Ok(applied)
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new(AliasCollision::FirstClaim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_for(bindings: &[ColumnBinding], field: CanonicalField) -> Option<&str> {
        bindings
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.header.as_str())
    }

    #[test]
    fn test_teacher_and_contact_headers() {
        let resolver = AliasResolver::default();
        let headers = ["Name of the Teacher", "Contact Number"];

        let bindings = resolver.resolve(&headers);
        assert_eq!(bindings.len(), 2);
        assert_eq!(field_for(&bindings, CanonicalField::Name), Some("Name of the Teacher"));
        assert_eq!(field_for(&bindings, CanonicalField::PhoneNumber), Some("Contact Number"));
    }

    #[test]
    fn test_substring_match_and_passthrough() {
        let resolver = AliasResolver::default();
        let headers = ["Timestamp", "E-mail", "Your EMAIL Address", "District Name", "State/UT"];

        let bindings = resolver.resolve(&headers);
        // "District Name" contains "name", so Name binds to it before City/District looks.
        assert_eq!(field_for(&bindings, CanonicalField::Name), Some("District Name"));
        assert_eq!(field_for(&bindings, CanonicalField::EmailId), Some("Your EMAIL Address"));
        assert_eq!(field_for(&bindings, CanonicalField::CityDistrict), None);
        assert_eq!(field_for(&bindings, CanonicalField::State), Some("State/UT"));
        assert!(bindings.iter().all(|b| b.header != "Timestamp"));
    }

    #[test]
    fn test_first_claim_collision() {
        let resolver = AliasResolver::new(AliasCollision::FirstClaim);
        let headers = ["Name of School", "Teacher Name"];

        let bindings = resolver.resolve(&headers);
        assert_eq!(field_for(&bindings, CanonicalField::Name), Some("Name of School"));
        assert_eq!(field_for(&bindings, CanonicalField::SchoolCollege), None);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_first_claim_moves_on_to_next_header() {
        let resolver = AliasResolver::new(AliasCollision::FirstClaim);
        let headers = ["Teacher Name", "Name of School"];

        let bindings = resolver.resolve(&headers);
        assert_eq!(field_for(&bindings, CanonicalField::Name), Some("Teacher Name"));
        assert_eq!(field_for(&bindings, CanonicalField::SchoolCollege), Some("Name of School"));
    }

    #[test]
    fn test_last_wins_collision() {
        let resolver = AliasResolver::new(AliasCollision::LastWins);
        let headers = ["Name of School", "Teacher Name"];

        let bindings = resolver.resolve(&headers);
        assert_eq!(bindings.len(), 1);
        assert_eq!(field_for(&bindings, CanonicalField::SchoolCollege), Some("Name of School"));
        assert_eq!(field_for(&bindings, CanonicalField::Name), None);
    }

    #[test]
    fn test_rename_dataframe_columns() {
        let mut df = DataFrame::new(vec![
            Series::new("Participant Name".into(), vec!["asha"]).into(),
            Series::new("Mobile No".into(), vec!["9876543210"]).into(),
            Series::new("Remarks".into(), vec!["ok"]).into(),
        ])
        .unwrap();

        let resolver = AliasResolver::default();
        let applied = resolver.map_to_canonical_schema(&mut df).unwrap();

        assert_eq!(applied.len(), 2);
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Name", "Phone Number", "Remarks"]);
    }

    #[test]
    fn test_rename_skipped_when_target_exists() {
        let mut df = DataFrame::new(vec![
            Series::new("Email Address".into(), vec!["a@b.com"]).into(),
            Series::new("Email ID".into(), vec!["c@d.com"]).into(),
        ])
        .unwrap();

        let resolver = AliasResolver::default();
        let applied = resolver.map_to_canonical_schema(&mut df).unwrap();

        assert!(applied.is_empty());
        assert!(df.column("Email Address").is_ok());
        assert!(df.column("Email ID").is_ok());
    }
}
