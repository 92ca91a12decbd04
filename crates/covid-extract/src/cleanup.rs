//! Light normalization applied before any pattern runs.

use std::sync::LazyLock;

use regex::Regex;

static EST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\best\.?\b").expect("Invalid est regex"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,()]").expect("Invalid punctuation regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Misspellings seen in chart text, with their corrections.
static SPELLING: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bffor\b", "for"),
        (r"\bplasme\b", "plasma"),
        (r"\bvomitting\b", "vomiting"),
    ]
    .into_iter()
    .map(|(pattern, fixed)| (Regex::new(pattern).expect("Invalid spelling regex"), fixed))
    .collect()
});

/// Replace every whitespace run with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Cleanup for the symptom finder.
///
/// Drops `est` tokens ("at est 3 wks"), blanks commas and parentheses,
/// spells out `&`, fixes known misspellings and collapses whitespace.
pub fn clean_symptom_sentence(sentence: &str) -> String {
    let mut text = EST.replace_all(sentence, " ").into_owned();
    text = PUNCTUATION.replace_all(&text, " ").into_owned();
    text = text.replace('&', " and ");
    for (regex, fixed) in SPELLING.iter() {
        text = regex.replace_all(&text, *fixed).into_owned();
    }
    collapse_whitespace(&text)
}

/// Cleanup for the diagnosis finder: `est` tokens and commas only.
pub fn clean_diagnosis_sentence(sentence: &str) -> String {
    let text = EST.replace_all(sentence, " ");
    let text = text.replace(',', " ");
    collapse_whitespace(&text)
}
