use strsim::generic_damerau_levenshtein;

/// Highest normalized distance still counted as a match (0 = exact)
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Normalized edit distance between `query` and its best-matching substring of `text`.
///
/// Both inputs are expected lowercased. The distance is Damerau-Levenshtein
/// (adjacent transpositions cost one edit), divided by the query length and
/// capped at 1.0.
///
/// Only windows whose length is within `floor(threshold * query_len)` of the
/// query length are compared: any other window is already further away
/// than the threshold allows.
pub fn match_score(query: &[char], text: &[char], threshold: f64) -> f64 {
    let query_len = query.len();
    if query_len == 0 {
        return 0.0;
    }
    if text.is_empty() {
        return 1.0;
    }

    let max_edits = (threshold * query_len as f64).floor() as usize;
    let min_window = query_len.saturating_sub(max_edits).max(1).min(text.len());
    let max_window = (query_len + max_edits).min(text.len());

    let mut best = query_len;
    'outer: for window in min_window..=max_window {
        for start in 0..=(text.len() - window) {
            let distance = generic_damerau_levenshtein(query, &text[start..start + window]);
            if distance < best {
                best = distance;
                if best == 0 {
                    break 'outer;
                }
            }
        }
    }

    best.min(query_len) as f64 / query_len as f64
}
