use crate::processor::field_normalizers::is_blank;
use regex::Regex;
use std::sync::LazyLock;

/// Words that close an institution name. Anything after the last one is
/// treated as address text.
pub const ANCHORS: &[&str] = &[
    "school",
    "college",
    "science",
    "commerce",
    "arts",
    "art",
    "vidyalaya",
    "shala",
    "vidya",
    "mandir",
    "vidyamandir",
    "boys",
    "girls",
    "classes",
    "ashram",
    "dnyanpeeth",
    "prathmik",
    "mahavidyalaya",
    "excellence",
];

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3})").expect("leading number pattern"));
static GLUED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(no\.?)(\d{1,3})").expect("glued number pattern"));

/// Cut an institute name after its last anchor word, keeping a branch
/// number written as `No 5`, `No. 325Satara` or `No325Satara`.
pub fn drop_trailing_location(value: &str) -> String {
    if is_blank(value) {
        return value.to_string();
    }

    let mut words: Vec<String> = value.split_whitespace().map(str::to_string).collect();

    let Some(anchor) = words
        .iter()
        .rposition(|w| ANCHORS.contains(&w.to_lowercase().as_str()))
    else {
        return value.to_string();
    };

    let mut keep_until = anchor;

    if let Some(next) = words.get(anchor + 1).map(|w| w.to_lowercase()) {
        if (next == "no" || next == "no.") && anchor + 2 < words.len() {
            let raw = &words[anchor + 2];
            if raw.chars().all(|c| c.is_ascii_digit()) && raw.len() <= 3 {
                keep_until = anchor + 2;
            } else if let Some(number) = LEADING_NUMBER.captures(raw).map(|c| c[1].to_string()) {
                words[anchor + 2] = number;
                keep_until = anchor + 2;
            }
        } else if let Some(number) = GLUED_NUMBER.captures(&next).map(|c| c[2].to_string()) {
            words[anchor + 1] = "No".to_string();
            words.insert(anchor + 2, number);
            keep_until = anchor + 2;
        }
    }

    words.truncate(keep_until + 1);
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_district_after_anchor() {
        assert_eq!(
            drop_trailing_location("Zilla Parishad High School No 5 Satara"),
            "Zilla Parishad High School No 5"
        );
        assert_eq!(
            drop_trailing_location("Kendriya Vidyalaya Colaba Mumbai"),
            "Kendriya Vidyalaya"
        );
    }

    #[test]
    fn test_uses_last_anchor() {
        assert_eq!(
            drop_trailing_location("Arts Commerce And Science College Baramati Pune"),
            "Arts Commerce And Science College"
        );
    }

    #[test]
    fn test_no_anchor_unchanged() {
        assert_eq!(drop_trailing_location("Sagar Academy Nashik"), "Sagar Academy Nashik");
        assert_eq!(drop_trailing_location(""), "");
    }

    #[test]
    fn test_branch_number_forms() {
        assert_eq!(
            drop_trailing_location("Municipal School No. 12 Dadar"),
            "Municipal School No. 12"
        );
        assert_eq!(
            drop_trailing_location("Municipal School No 325Satara"),
            "Municipal School No 325"
        );
        assert_eq!(
            drop_trailing_location("Municipal School no325Satara"),
            "Municipal School No 325"
        );
        assert_eq!(
            drop_trailing_location("Municipal School No.7 Wai"),
            "Municipal School No 7"
        );
    }

    #[test]
    fn test_no_without_number_is_dropped() {
        assert_eq!(drop_trailing_location("Municipal School No"), "Municipal School");
        assert_eq!(
            drop_trailing_location("Municipal School No Ward Office"),
            "Municipal School"
        );
    }
}
