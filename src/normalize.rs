//! Title normalization shared by the similarity scorer, the aggregator and
//! the per-source dedup.

/// Words dropped before titles are compared.
const STOPWORDS: [&str; 11] = [
    "the", "a", "an", "of", "in", "on", "at", "to", "for", "and", "or",
];

/// Reduce a title to its comparison form: lowercase ASCII letters, digits and
/// single spaces, with stopwords removed.
///
/// Anything outside `[a-z0-9\s]` after lowercasing is dropped, so accented or
/// non-Latin titles lose those characters rather than being transliterated.
pub fn normalize(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| !STOPWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key used to drop repeated titles inside one source. Lighter than
/// [`normalize`]: punctuation and stopwords are kept so "Up" and "Up!" stay
/// distinct entries for display.
pub fn dedup_key(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collapse internal whitespace (newlines, tabs, runs of spaces) and trim.
pub fn clean_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
