use crate::processor::field_normalizers::{collapse_whitespace, is_blank, title_case};
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_MIN_FIRST_WORD_LEN: usize = 3;

/// Whole-cell city misspellings, keyed lowercase.
pub const CITY_CORRECTIONS: &[(&str, &str)] = &[
    ("nagour", "nagpur"),
    ("nasik", "nashik"),
    ("bombay", "mumbai"),
    ("ahmdabad", "ahmedabad"),
    ("ahemdabad", "ahmedabad"),
    ("ahemedabad", "ahmedabad"),
    ("walchandanagar", "walchandnagar"),
    ("latue", "latur"),
    ("puna", "pune"),
    ("umarga", "omerga"),
    ("nishik", "nashik"),
    ("visakhapatnam", "vishakapatnam"),
    ("devlali", "deolali"),
    ("nashil", "nashik"),
    ("gandhinglj", "gandhinglaj"),
    ("chatarpati", "chhatrapati"),
    ("hubballi", "hubli"),
    ("sambhajinagar", "sambhaji nagar"),
];

pub const STATE_CORRECTIONS: &[(&str, &str)] = &[
    ("mahashttra", "maharashtra"),
    ("maharastra", "maharashtra"),
    ("karnatak", "karnataka"),
    ("andra pradesh", "andhra pradesh"),
    ("tamilnadu", "tamil nadu"),
];

/// Two-word city names that must survive first-word truncation.
pub const MULTI_WORD_CITIES: &[&str] = &[
    "navi mumbai",
    "new delhi",
    "greater noida",
    "port blair",
    "north goa",
    "south goa",
    "west delhi",
    "east delhi",
    "central delhi",
    "old goa",
    "panaji city",
];

static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\-/,]").expect("separator pattern"));

fn correct<'a>(table: &[(&str, &'a str)], value: &'a str) -> &'a str {
    table
        .iter()
        .find(|(wrong, _)| *wrong == value)
        .map(|(_, right)| *right)
        .unwrap_or(value)
}

/// Reduces location cells such as `"Navi Mumbai - 400614"` or
/// `"Pune, Maharashtra"` to a bare city name.
#[derive(Debug, Clone)]
pub struct PlaceStandardizer {
    min_first_word_len: usize,
}

impl PlaceStandardizer {
    pub fn new(min_first_word_len: usize) -> Self {
        PlaceStandardizer { min_first_word_len }
    }

    pub fn standardize_city(&self, value: &str) -> String {
        if is_blank(value) {
            return value.to_string();
        }

        let lower = value.to_lowercase();
        let spaced = collapse_whitespace(&SEPARATOR_REGEX.replace_all(&lower, " "));
        let corrected = correct(CITY_CORRECTIONS, &spaced);

        let words: Vec<&str> = corrected.split_whitespace().collect();
        let Some(first) = words.first() else {
            return value.to_string();
        };

        // Short leading tokens are usually abbreviations; keep the whole cell.
        if first.chars().count() < self.min_first_word_len {
            return title_case(corrected);
        }

        if let [first, second, ..] = words.as_slice() {
            let pair = format!("{} {}", first, second);
            if MULTI_WORD_CITIES.contains(&pair.as_str()) {
                return title_case(&pair);
            }
        }

        title_case(first)
    }

    pub fn standardize_state(&self, value: &str) -> String {
        if is_blank(value) {
            return value.to_string();
        }

        let collapsed = collapse_whitespace(&value.to_lowercase());
        title_case(correct(STATE_CORRECTIONS, &collapsed))
    }
}

impl Default for PlaceStandardizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FIRST_WORD_LEN)
    }
}
