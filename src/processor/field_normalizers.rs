use crate::models::{Checked, DateInput, Validity};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\.-]+@[\w\.-]+\.\w+$").expect("email pattern"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
];

// Month-first wherever day and month are both numeric.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%Y.%m.%d",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%m %d %Y",
    "%d %m %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %b, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

// Plausible year range. Also rules out short years picked up by `%Y`.
const MIN_YEAR: i32 = 1677;
const MAX_YEAR: i32 = 2262;

fn in_range(date: NaiveDate) -> Option<NaiveDate> {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(date)
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Title-case the way spreadsheet users expect from Python's `str.title`:
/// a letter is upper-cased when the previous character is not a letter.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_cased = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }

    out
}

pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim, collapse internal whitespace and title-case. Blank input is
/// returned unchanged.
pub fn normalize_text(value: &str) -> String {
    if is_blank(value) {
        return value.to_string();
    }
    title_case(&collapse_whitespace(value))
}

/// First and last whitespace token; middle names are dropped.
pub fn split_name(name: &str) -> (String, String) {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), String::new()),
        [first, .., last] => (first.to_string(), last.to_string()),
    }
}

pub fn clean_phone(value: &str) -> Checked {
    if is_blank(value) {
        return Checked {
            value: value.to_string(),
            validity: None,
        };
    }

    let mut digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with("91") && digits.len() > 10 {
        digits = digits[digits.len() - 10..].to_string();
    }

    let validity = Validity::from_bool(digits.len() == 10);
    Checked {
        value: digits,
        validity: Some(validity),
    }
}

pub fn clean_email(value: &str) -> Checked {
    if is_blank(value) {
        return Checked {
            value: value.to_string(),
            validity: None,
        };
    }

    let email = value.trim().to_lowercase();
    let validity = Validity::from_bool(EMAIL_REGEX.is_match(&email));
    Checked {
        value: email,
        validity: Some(validity),
    }
}

/// Resolve a date from a structured value or free text. `None` means the
/// input was blank or could not be read as a date.
pub fn normalize_date(input: &DateInput) -> Option<NaiveDate> {
    match input {
        DateInput::Date(date) => Some(*date),
        DateInput::DateTime(datetime) => Some(datetime.date()),
        DateInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            parse_flexible_date(text).or_else(|| parse_numeric_date(text))
        }
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return in_range(datetime.date_naive());
    }

    let datetimes = DATETIME_FORMATS
        .iter()
        .filter_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date());

    let dates = DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(text, format).ok());

    datetimes
        .chain(dates)
        .find_map(in_range)
        .or_else(|| parse_compact_date(text))
        .or_else(|| parse_month_year(text))
}

/// `YYYYMMDD` with no separators.
fn parse_compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).and_then(in_range)
}

/// `March 2023` or `Mar 2023`, read as the first of the month.
fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let padded = format!("1 {}", text);
    ["%d %B %Y", "%d %b %Y"]
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(&padded, format).ok())
        .find_map(in_range)
}

/// `a/b/c`, `a-b-c` or `a.b.c` in the first token. A part above 12 is the day;
/// otherwise day-first. Years up to 31 are taken as 20xx.
fn parse_numeric_date(text: &str) -> Option<NaiveDate> {
    let token = text.split_whitespace().next()?;
    let parts: Vec<&str> = token.split(['/', '-', '.']).collect();
    if parts.len() != 3 {
        return None;
    }

    let mut numbers = [0u32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    let [a, b, c] = numbers;

    let (day, month) = if a > 12 {
        (a, b)
    } else if b > 12 {
        (b, a)
    } else {
        (a, b)
    };

    let year = if c > 31 { c } else { c + 2000 };
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day).and_then(in_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  asha   PATIL "), "Asha Patil");
        assert_eq!(normalize_text("o'brien\tkumar"), "O'Brien Kumar");
        assert_eq!(normalize_text("   "), "   ");
        assert_eq!(normalize_text(""), "");

        let once = normalize_text(" rahul  dev   sharma ");
        assert!(!once.contains("  "));
        assert_eq!(once, once.trim());
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn test_title_case_digits() {
        assert_eq!(title_case("5th standard"), "5Th Standard");
        assert_eq!(title_case("st. xavier's"), "St. Xavier'S");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name(""), (String::new(), String::new()));
        assert_eq!(split_name("Asha"), ("Asha".to_string(), String::new()));
        assert_eq!(
            split_name("Asha Ramesh Patil"),
            ("Asha".to_string(), "Patil".to_string())
        );
    }

    #[test]
    fn test_clean_phone() {
        let phone = clean_phone("+91-9876543210");
        assert_eq!(phone.value, "9876543210");
        assert_eq!(phone.flag(), "Yes");

        let short = clean_phone("12345");
        assert_eq!(short.value, "12345");
        assert_eq!(short.flag(), "No");

        let spaced = clean_phone("98765 43210");
        assert_eq!(spaced.value, "9876543210");
        assert_eq!(spaced.flag(), "Yes");

        // Leading zero is not a country code.
        let trunk = clean_phone("09876543210");
        assert_eq!(trunk.value, "09876543210");
        assert_eq!(trunk.flag(), "No");

        let blank = clean_phone("  ");
        assert_eq!(blank.value, "  ");
        assert_eq!(blank.flag(), "");
    }

    #[test]
    fn test_clean_email() {
        let email = clean_email("John.Doe@EXAMPLE.com");
        assert_eq!(email.value, "john.doe@example.com");
        assert_eq!(email.flag(), "Yes");

        let bad = clean_email("not-an-email");
        assert_eq!(bad.value, "not-an-email");
        assert_eq!(bad.flag(), "No");

        let permissive = clean_email(" a..b@x..y.in ");
        assert_eq!(permissive.value, "a..b@x..y.in");
        assert_eq!(permissive.flag(), "Yes");

        assert_eq!(clean_email("").flag(), "");
    }

    #[test]
    fn test_normalize_date_numeric() {
        assert_eq!(normalize_date(&"15/03/2023".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"13/02/22".into()), date(2022, 2, 13));
        assert_eq!(normalize_date(&"".into()), None);
        assert_eq!(format_date(normalize_date(&"".into())), "");
    }

    #[test]
    fn test_normalize_date_month_first_bias() {
        assert_eq!(normalize_date(&"03/04/2023".into()), date(2023, 3, 4));
        assert_eq!(normalize_date(&"3/15/2023 10:22:33".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"03/04/22".into()), date(2022, 3, 4));
    }

    #[test]
    fn test_normalize_date_text_forms() {
        assert_eq!(normalize_date(&"2023-11-05".into()), date(2023, 11, 5));
        assert_eq!(normalize_date(&"2023-11-05 14:30:00".into()), date(2023, 11, 5));
        assert_eq!(normalize_date(&"2023-11-05T14:30:00+05:30".into()), date(2023, 11, 5));
        assert_eq!(normalize_date(&"5 Nov 2023".into()), date(2023, 11, 5));
        assert_eq!(normalize_date(&"Nov 5, 2023".into()), date(2023, 11, 5));
    }

    #[test]
    fn test_normalize_date_dotted() {
        assert_eq!(normalize_date(&"15.03.2023".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"05.11.2023".into()), date(2023, 5, 11));
        assert_eq!(normalize_date(&"2023.03.15".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"15.03.23".into()), date(2023, 3, 15));
    }

    #[test]
    fn test_normalize_date_space_separated() {
        assert_eq!(normalize_date(&"15 03 2023".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"03 04 2023".into()), date(2023, 3, 4));
    }

    #[test]
    fn test_normalize_date_compact() {
        assert_eq!(normalize_date(&"20230315".into()), date(2023, 3, 15));
        assert_eq!(normalize_date(&"20231315".into()), None);
    }

    #[test]
    fn test_normalize_date_month_year() {
        assert_eq!(normalize_date(&"March 2023".into()), date(2023, 3, 1));
        assert_eq!(normalize_date(&"Nov 2023".into()), date(2023, 11, 1));
        assert_eq!(format_date(normalize_date(&"march 2023".into())), "2023-03-01");
    }

    #[test]
    fn test_normalize_date_rejects() {
        assert_eq!(normalize_date(&"31/04/2023".into()), None);
        assert_eq!(normalize_date(&"12/2023".into()), None);
        assert_eq!(normalize_date(&"1/2/3/4".into()), None);
        assert_eq!(normalize_date(&"aa/bb/cc".into()), None);
        assert_eq!(normalize_date(&"next tuesday".into()), None);
        assert_eq!(normalize_date(&"1/2/100".into()), None);
    }

    #[test]
    fn test_normalize_date_structured() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(normalize_date(&DateInput::from(day)), Some(day));

        let stamp = day.and_hms_opt(18, 45, 0).unwrap();
        assert_eq!(normalize_date(&DateInput::from(stamp)), Some(day));
    }
}
