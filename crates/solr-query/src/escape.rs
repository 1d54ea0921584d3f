//! Escaping of characters reserved by the Lucene/Solr query parser.

/// Internal stand-in for a literal `*` while escaping wildcards.
const ASTERISK: char = '\u{FDD0}';

/// Internal stand-in for a literal `?` while escaping wildcards.
const QUESTION: char = '\u{FDD1}';

/// Token delimiters used to decide whether a term must be quoted.
const TOKEN_DELIMITERS: [char; 5] = [' ', '\t', '\n', '\r', '\u{000C}'];

/// Returns true if `c` must be preceded by a backslash in a query term.
pub fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '\\' | '+'
            | '-'
            | '!'
            | '('
            | ')'
            | ':'
            | '^'
            | '['
            | ']'
            | '"'
            | '{'
            | '}'
            | '~'
            | '*'
            | '?'
            | '|'
            | '&'
            | ';'
            | '/'
    ) || is_query_whitespace(c)
}

/// Whitespace as the search client's escaper sees it: Unicode separators
/// except the no-break spaces, plus the ASCII control separators.
fn is_query_whitespace(c: char) -> bool {
    match c {
        '\u{001C}'..='\u{001F}' => true,
        '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}

/// Escapes every reserved character with a backslash.
///
/// ```rust
/// use solr_query::escape::escape_query_chars;
///
/// assert_eq!(escape_query_chars("a+b:c"), "a\\+b\\:c");
/// ```
pub fn escape_query_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if is_reserved(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes `text` like [`escape_query_chars`] but keeps `*` and `?` as
/// wildcards.
///
/// Wildcards are swapped for private-use placeholders, the text is escaped,
/// then the placeholders are restored.
pub fn escape_wildcard(text: &str) -> String {
    let protected: String = text
        .chars()
        .map(|c| match c {
            '*' => ASTERISK,
            '?' => QUESTION,
            other => other,
        })
        .collect();

    escape_query_chars(&protected)
        .chars()
        .map(|c| match c {
            ASTERISK => '*',
            QUESTION => '?',
            other => other,
        })
        .collect()
}

/// Number of delimiter-separated tokens in `text`.
pub fn token_count(text: &str) -> usize {
    text.split(TOKEN_DELIMITERS)
        .filter(|token| !token.is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_query_chars("Hello"), "Hello");
    }

    #[test]
    fn test_escape_reserved_chars() {
        assert_eq!(
            escape_query_chars("+-!():^[]\"{}~*?|&;/\\"),
            "\\+\\-\\!\\(\\)\\:\\^\\[\\]\\\"\\{\\}\\~\\*\\?\\|\\&\\;\\/\\\\"
        );
    }

    #[test]
    fn test_escape_boolean_operators() {
        assert_eq!(escape_query_chars("a&&b||c"), "a\\&\\&b\\|\\|c");
    }

    #[test]
    fn test_escape_whitespace() {
        assert_eq!(escape_query_chars(" x"), "\\ x");
        assert_eq!(escape_query_chars("x\t"), "x\\\t");
    }

    #[test]
    fn test_no_break_spaces_are_not_escaped() {
        assert_eq!(escape_query_chars("a\u{A0}b"), "a\u{A0}b");
        assert_eq!(escape_query_chars("a\u{2007}b\u{202F}c"), "a\u{2007}b\u{202F}c");
        assert_eq!(escape_query_chars("a\u{2003}b"), "a\\\u{2003}b");
        assert_eq!(escape_query_chars("a\u{1F}b"), "a\\\u{1F}b");
    }

    #[test]
    fn test_escape_wildcard_keeps_meta_chars() {
        assert_eq!(escape_wildcard("hel*"), "hel*");
        assert_eq!(escape_wildcard("hel?"), "hel?");
        assert_eq!(escape_wildcard("hel*-"), "hel*\\-");
        assert_eq!(escape_wildcard("a:b?c*"), "a\\:b?c*");
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count(""), 0);
        assert_eq!(token_count("hello"), 1);
        assert_eq!(token_count("  hello  "), 1);
        assert_eq!(token_count("hello world"), 2);
        assert_eq!(token_count("a\tb\nc"), 3);
    }
}
