// src/text.rs
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lowercase `raw` and drop diacritics (NFD, then remove combining marks).
/// `"Teórica"` → `"teorica"`.
pub fn fold(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
