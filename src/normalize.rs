use std::sync::LazyLock;

use regex::Regex;

// Page footers the PDF text layer leaves behind, e.g. "-- 2 of 2 --".
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--\s*\d+\s+of\s+\d+\s*--").unwrap());

// Allergen codes such as "(3,7,12,T)". Also eats other all-numeric
// parentheticals like "(17)".
static ALLERGEN_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([0-9,TKMN\s]+\)").unwrap());

pub fn strip_page_numbers(text: &str) -> String {
    PAGE_NUMBER.replace_all(text, "").trim().to_string()
}

pub fn strip_allergens(text: &str) -> String {
    ALLERGEN_MARKER.replace_all(text, "").into_owned()
}

pub fn normalize(text: &str, strip_allergen_markers: bool) -> String {
    let text = strip_page_numbers(text);
    if strip_allergen_markers {
        strip_allergens(&text)
    } else {
        text
    }
}
