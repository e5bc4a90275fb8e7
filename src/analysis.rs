//! Text analysis for Tansy.
//!
//! Tokenization is deliberately simple: documents and queries are split on
//! single spaces, empty tokens are dropped, and no normalization is applied.
//! Validation rejects control characters and malformed minus-word syntax
//! before any text reaches the index.

/// Split text on spaces into owned tokens, dropping empty tokens.
pub fn split_words(text: &str) -> Vec<String> {
    split_words_view(text)
        .into_iter()
        .map(|word| word.to_string())
        .collect()
}

/// Split borrowed text on spaces into sub-slices, dropping empty tokens.
///
/// Produces exactly the same token sequence as [`split_words`], including for
/// runs of spaces and leading/trailing spaces.
pub fn split_words_view(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// Check that a word (or whole text) contains no control characters.
///
/// Any character with a code point below U+0020 makes the input invalid.
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Check the minus-word syntax of raw query text.
///
/// Invalid if a `-` is the last character of the text or is immediately
/// followed by another `-`.
pub fn is_correct_query_syntax(text: &str) -> bool {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'-' {
            match bytes.get(i + 1) {
                None => return false,
                Some(b'-') => return false,
                Some(_) => {}
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_basic() {
        assert_eq!(split_words("fluffy cat tail"), vec!["fluffy", "cat", "tail"]);
    }

    #[test]
    fn test_split_words_extra_spaces() {
        assert_eq!(split_words("  fluffy   cat "), vec!["fluffy", "cat"]);
        assert!(split_words("   ").is_empty());
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_split_variants_agree() {
        for text in ["", " ", "a", " a", "a ", "a  b", "  a b  c  "] {
            let owned = split_words(text);
            let views = split_words_view(text);
            assert_eq!(owned, views, "mismatch for {text:?}");
        }
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("fluffy"));
        assert!(is_valid_word("-cat"));
        assert!(is_valid_word(""));
        assert!(!is_valid_word("fl\u{1}uffy"));
        assert!(!is_valid_word("tail\n"));
        assert!(!is_valid_word("\t"));
    }

    #[test]
    fn test_is_correct_query_syntax() {
        assert!(is_correct_query_syntax("fluffy -cat"));
        assert!(is_correct_query_syntax("fluffy-cat"));
        assert!(is_correct_query_syntax(""));
        assert!(!is_correct_query_syntax("fluffy -"));
        assert!(!is_correct_query_syntax("-"));
        assert!(!is_correct_query_syntax("fluffy --cat"));
    }
}
