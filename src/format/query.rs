// src/format/query.rs
// =============================================================================
// Query string tokenizing and ordering.
//
// Rust concepts:
// - Borrowed slices: every token is a &str pointing into the original query,
//   nothing is copied until the caller builds the output string
// - Stable sort: slice::sort_by never reorders elements that compare equal
// =============================================================================

// Splits a query string on '&' and orders the tokens by key
//
// Parameters:
//   query: everything after the first '?' of a URL
//
// Returns:
//   Some(tokens) sorted ascending by the text before each token's first '='.
//     Tokens with equal keys stay in the order they appeared.
//   None if the query is malformed: empty, or holding a token with no '='.
//
// Example:
//   "b=2&a=1&b=0" -> Some(["a=1", "b=2", "b=0"])
pub fn sort_query_tokens(query: &str) -> Option<Vec<&str>> {
    let mut tokens: Vec<&str> = query.split('&').collect();

    // "a=1&" would otherwise leave an empty token at the end
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }

    if tokens.is_empty() || tokens.iter().any(|token| !token.contains('=')) {
        return None;
    }

    tokens.sort_by(|a, b| query_key(a).cmp(query_key(b)));
    Some(tokens)
}

fn query_key(token: &str) -> &str {
    token.split_once('=').map_or(token, |(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_by_key() {
        assert_eq!(
            sort_query_tokens("page=2&lang=en&id=9"),
            Some(vec!["id=9", "lang=en", "page=2"])
        );
    }

    #[test]
    fn test_values_do_not_break_ties() {
        assert_eq!(
            sort_query_tokens("b=2&a=1&b=0"),
            Some(vec!["a=1", "b=2", "b=0"])
        );
    }

    #[test]
    fn test_empty_key_sorts_first() {
        assert_eq!(sort_query_tokens("a=1&=x"), Some(vec!["=x", "a=1"]));
    }

    #[test]
    fn test_key_is_text_before_first_equals() {
        // "a=b=c" has key "a", value "b=c"
        assert_eq!(sort_query_tokens("b=1&a=b=c"), Some(vec!["a=b=c", "b=1"]));
    }

    #[test]
    fn test_malformed_queries() {
        assert_eq!(sort_query_tokens(""), None);
        assert_eq!(sort_query_tokens("flag"), None);
        assert_eq!(sort_query_tokens("a=1&&b=2"), None);
    }
}
