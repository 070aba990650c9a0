//! Levenshtein edit distance over `char`s.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Uses two rolling rows sized by the shorter input, so memory is
/// O(min(|a|, |b|)).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    // Rows run along the shorter sequence; the longer one is only streamed.
    let (long, short) = if a_len >= b_len { (a, b) } else { (b, a) };
    let short: Vec<char> = short.chars().collect();

    if short.is_empty() {
        return a_len.max(b_len);
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row = vec![0; short.len() + 1];

    for (i, lc) in long.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != *sc);
            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}
