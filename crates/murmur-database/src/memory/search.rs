//! Token-overlap text scoring used by the in-memory post search.

/// Lowercased alphanumeric tokens of `text`.
pub(super) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// How many tokens of `document` match any token of `terms`.
///
/// Zero means no match.
pub(super) fn score(terms: &[String], document: &str) -> usize {
    if terms.is_empty() {
        return 0;
    }
    tokens(document)
        .iter()
        .filter(|token| terms.contains(token))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_on_punctuation() {
        assert_eq!(tokens("Hello, World!  rust-lang"), vec!["hello", "world", "rust", "lang"]);
    }

    #[test]
    fn test_score_counts_repeated_hits() {
        let terms = tokens("rust");
        assert_eq!(score(&terms, "Rust is fun. I like rust."), 2);
        assert_eq!(score(&terms, "Go is fun."), 0);
    }

    #[test]
    fn test_empty_terms_match_nothing() {
        assert_eq!(score(&[], "anything at all"), 0);
    }
}
