//! Text segmentation: hymn verse splitting and fixed-width chunking.
//!
//! "Character" means a Unicode scalar value throughout the crate; every
//! budget check goes through [`char_len`].

/// Separator between hymn verses.
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Character count used by every pagination budget.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split hymn lyrics into verses on blank lines.
///
/// Blank (whitespace-only) segments are dropped. Lyrics without a blank line
/// yield exactly one verse. Empty lyrics yield no verses.
pub fn split_verses(lyrics: &str) -> Vec<&str> {
    lyrics
        .split(VERSE_SEPARATOR)
        .filter(|verse| !verse.trim().is_empty())
        .collect()
}

/// Split `text` into consecutive pieces of `max_chars` characters.
///
/// Every piece except the last has exactly `max_chars` characters. Pieces
/// borrow from `text` and concatenate back to it. A `max_chars` of zero is
/// treated as one.
pub fn chunk_chars(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut out = Vec::with_capacity(char_len(text) / max_chars + 1);
    let mut rest = text;
    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(max_chars)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split_at);
        out.push(head);
        rest = tail;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_three_verses() {
        assert_eq!(split_verses("v1\n\nv2\n\nv3"), vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn single_verse_is_whole_text() {
        let lyrics = "line one\nline two";
        assert_eq!(split_verses(lyrics), vec![lyrics]);
    }

    #[test]
    fn blank_segments_are_discarded() {
        assert_eq!(split_verses("a\n\n\n\nb\n\n"), vec!["a", "b"]);
        assert!(split_verses("").is_empty());
        assert!(split_verses("  \n\n \t").is_empty());
    }

    #[test]
    fn verses_rejoin_to_original_lyrics() {
        let lyrics = "Amazing grace\nhow sweet\n\nT'was grace\n\nThrough many dangers";
        assert_eq!(split_verses(lyrics).join(VERSE_SEPARATOR), lyrics);
    }

    #[test]
    fn chunks_are_exact_width_except_last() {
        let text = "x".repeat(450);
        let chunks = chunk_chars(&text, 200);
        let lens: Vec<usize> = chunks.iter().map(|c| char_len(c)).collect();
        assert_eq!(lens, vec![200, 200, 50]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn chunking_counts_characters_not_bytes() {
        let text = "主".repeat(5);
        let chunks = chunk_chars(&text, 2);
        assert_eq!(chunks, vec!["主主", "主主", "主"]);
    }

    #[test]
    fn chunking_edge_cases() {
        assert!(chunk_chars("", 10).is_empty());
        assert_eq!(chunk_chars("abc", 0), vec!["a", "b", "c"]);
        assert_eq!(chunk_chars("abc", 3), vec!["abc"]);
    }
}
