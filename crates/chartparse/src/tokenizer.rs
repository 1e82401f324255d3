//! Whitespace tokenizer for phrase input.

/// Split a phrase into tokens at Unicode whitespace.
///
/// Leading and trailing whitespace is ignored; an all-whitespace (or empty)
/// input yields no tokens, and parsing no tokens yields an empty forest.
#[must_use]
pub fn tokenize(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(
            tokenize("  the\tdog \n chased "),
            ["the", "dog", "chased"]
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }
}
