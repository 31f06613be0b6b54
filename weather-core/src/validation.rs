use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only; `\d` in the regex crate also matches other Unicode digits.
static ZIPCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("zipcode pattern compiles"));

/// Accepts `NNNNN-NNN` or `NNNNNNNN`. No trimming or normalization.
pub fn is_valid_zipcode(code: &str) -> bool {
    ZIPCODE_PATTERN.is_match(code)
}
