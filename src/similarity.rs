use crate::normalize::normalize;

/// Score how alike two titles are, from 0.0 (nothing in common) to 1.0
/// (identical once normalized).
///
/// Containment is scored by length ratio so "Kraven" vs "Kraven the Hunter"
/// lands well above unrelated titles; everything else falls back to edit
/// distance over the normalized strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longer = len_a.max(len_b);

    if a.contains(&b) || b.contains(&a) {
        let shorter = len_a.min(len_b);
        return shorter as f64 / longer as f64;
    }

    let distance = strsim::levenshtein(&a, &b);
    1.0 - distance as f64 / longer as f64
}
