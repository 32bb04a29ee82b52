use crate::processor::field_normalizers::{collapse_whitespace, is_blank, title_case};
use crate::processor::school_rules::SCHOOL_REPLACEMENTS;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_MAX_PASSES: usize = 6;

static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("bracket pattern"));
static NON_ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("non-alnum pattern"));
static POSSESSIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'S\b").expect("possessive pattern"));

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SCHOOL_REPLACEMENTS
        .iter()
        .map(|(pattern, replacement)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("invalid school rule {}: {}", pattern, e));
            (regex, *replacement)
        })
        .collect()
});

/// Rewrites free-text institute names towards one canonical spelling by
/// applying the rule table until a pass changes nothing.
#[derive(Debug, Clone)]
pub struct SchoolStandardizer {
    max_passes: usize,
}

impl SchoolStandardizer {
    pub fn new(max_passes: usize) -> Self {
        SchoolStandardizer {
            max_passes: max_passes.max(1),
        }
    }

    pub fn standardize(&self, value: &str) -> String {
        if is_blank(value) {
            return value.to_string();
        }

        let (rewritten, passes) = self.rewrite(&Self::preprocess(value));
        debug!("Standardized '{}' in {} pass(es)", value, passes);

        let titled = title_case(&collapse_whitespace(&rewritten));
        POSSESSIVE_REGEX.replace_all(&titled, "'s").into_owned()
    }

    fn preprocess(value: &str) -> String {
        let lower = value.to_lowercase();
        let without_brackets = BRACKET_REGEX.replace_all(&lower, "");
        let cleaned = NON_ALNUM_REGEX.replace_all(&without_brackets, " ");
        collapse_whitespace(&cleaned)
    }

    /// One pass applies every rule in table order. Returns the text and the
    /// number of passes run.
    fn rewrite(&self, input: &str) -> (String, usize) {
        let mut text = input.to_string();

        for pass in 1..=self.max_passes {
            let before = text.clone();
            for (regex, replacement) in COMPILED_RULES.iter() {
                if regex.is_match(&text) {
                    text = regex.replace_all(&text, *replacement).into_owned();
                }
            }

            if text == before {
                return (text, pass);
            }
        }

        debug!("No fixed point for '{}' after {} passes", input, self.max_passes);
        (text, self.max_passes)
    }
}

impl Default for SchoolStandardizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}
