// src/similarity.rs
//! Normalized edit-distance similarity used by the deduplicator.

/// Similarity between two strings in `[0.0, 1.0]`: `1.0` means identical,
/// `0.0` completely different. When the longer string is empty the result is
/// `1.0` by convention.
///
/// Defined as `(max_len - levenshtein(a, b)) / max_len`. Inputs are article
/// titles (generally well under 200 chars), so the quadratic table is fine.
pub fn similarity(a: &str, b: &str) -> f32 {
    let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 1.0;
    }
    let dist = levenshtein(&a, &b);
    (longer - dist) as f32 / longer as f32
}

/// Classic dynamic-programming edit distance: insertion, deletion and
/// substitution each cost 1.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];

    for (i, cell) in matrix[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in matrix.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b.len() {
        for i in 1..=a.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            matrix[j][i] = (matrix[j][i - 1] + 1)
                .min(matrix[j - 1][i] + 1)
                .min(matrix[j - 1][i - 1] + cost);
        }
    }

    matrix[b.len()][a.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("breaking news", "breaking news"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("kitten", "sitting"),
            ("global markets rally", "global markets fall"),
            ("", "abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn known_distance() {
        // levenshtein(kitten, sitting) = 3, max len 7
        let s = similarity("kitten", "sitting");
        assert!((s - (7.0 - 3.0) / 7.0).abs() < 1e-6);
    }

    #[test]
    fn multibyte_titles_are_counted_by_char() {
        // One substitution over four chars.
        let s = similarity("café", "cafe");
        assert!((s - 0.75).abs() < 1e-6);
    }

    #[test]
    fn agrees_with_strsim() {
        let pairs = [
            ("breaking major tech innovation unveiled", "breaking major tech innovation unveiled today"),
            ("global climate summit reaches agreement", "climate summit reaches historic agreement"),
            ("a", "b"),
            ("short", "a much longer unrelated headline"),
        ];
        for (a, b) in pairs {
            let ours = similarity(a, b) as f64;
            let theirs = strsim::normalized_levenshtein(a, b);
            assert!(
                (ours - theirs).abs() < 1e-6,
                "mismatch for ({a:?}, {b:?}): {ours} vs {theirs}"
            );
        }
    }
}
