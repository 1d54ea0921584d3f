//! Factory functions for building query expressions.
//!
//! Raw strings given where an expression is expected are lifted through
//! [`term`], so `eq("field", "Hello")` and `eq("field", term("Hello"))`
//! are the same expression.
//!
//! ```rust
//! use solr_query::builder::{and, any, eq, or, prohibited, ternary, none};
//!
//! let q = and([
//!     eq("type", or(["t1", "t2", "t3"]).unwrap()).unwrap(),
//!     or([
//!         eq("f1", "v1").unwrap(),
//!         eq("f2", "v2").unwrap(),
//!         ternary(
//!             true,
//!             and([eq("c3", "v3").unwrap(), prohibited(eq("c4", any()).unwrap())]).unwrap(),
//!             none(),
//!         ),
//!     ])
//!     .unwrap(),
//! ])
//! .unwrap();
//!
//! assert_eq!(
//!     q.to_string(),
//!     "(type:((t1 OR t2 OR t3)) AND (f1:v1 OR f2:v2 OR (c3:v3 AND -(c4:*))))"
//! );
//! ```

use crate::ast::{Combinator, Field, Operands, QueryExpression, Text};
use crate::error::QueryResult;
use crate::escape::{escape_query_chars, escape_wildcard, token_count};
use crate::range::{Bound, Range};

// =============================================================================
// Leaves
// =============================================================================

/// `*`
pub fn any() -> QueryExpression {
    QueryExpression::ANY
}

/// The empty expression.
pub fn none() -> QueryExpression {
    QueryExpression::NONE
}

/// Builds a term, quoting or escaping it as needed.
///
/// `"*"` becomes [`any`], `""` becomes [`none`]. Text made of several
/// whitespace-separated tokens is quoted verbatim; anything else has its
/// reserved characters escaped.
pub fn term(text: &str) -> QueryExpression {
    if let Some(sentinel) = sentinel(text) {
        return sentinel;
    }
    let safe = if token_count(text) > 1 {
        format!("\"{}\"", text)
    } else {
        escape_query_chars(text)
    };
    Text::verbatim(safe).into()
}

/// Builds a wildcard term where `*` and `?` keep their meaning and every
/// other reserved character is escaped.
pub fn wildcard(text: &str) -> QueryExpression {
    if let Some(sentinel) = sentinel(text) {
        return sentinel;
    }
    Text::verbatim(escape_wildcard(text)).into()
}

/// Builds a quoted phrase.
///
/// The text is not escaped, so an embedded `"` ends the phrase early.
pub fn phrase(text: &str) -> QueryExpression {
    Text::verbatim(format!("\"{}\"", text)).into()
}

/// Builds `[from TO to]`.
pub fn range(from: impl Into<Bound>, to: impl Into<Bound>) -> QueryResult<QueryExpression> {
    Range::new(from, to)
        .map(QueryExpression::from)
        .inspect_err(|err| tracing::debug!(%err, "rejected range"))
}

fn sentinel(text: &str) -> Option<QueryExpression> {
    match text {
        "*" => Some(QueryExpression::ANY),
        "" => Some(QueryExpression::NONE),
        _ => None,
    }
}

// =============================================================================
// Field binding
// =============================================================================

/// Builds `field:expression`.
///
/// Numbers and booleans are accepted as values: `eq("id", 42)` is `id:42`.
pub fn eq(field: &str, expression: impl Into<QueryExpression>) -> QueryResult<QueryExpression> {
    Field::new(field, expression).map(QueryExpression::from)
}

// =============================================================================
// Boolean combinators
// =============================================================================

/// Builds `(a AND b ...)`.
pub fn and<I>(expressions: I) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    I::Item: Into<QueryExpression>,
{
    operands("AND", expressions).map(|ops| Combinator::And(ops).into())
}

/// Builds `(a OR b ...)`.
pub fn or<I>(expressions: I) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    I::Item: Into<QueryExpression>,
{
    operands("OR", expressions).map(|ops| Combinator::Or(ops).into())
}

/// Builds `(a b ...)`: operands side by side with no keyword, for mixing
/// plain terms with `+`, `-` and `NOT` clauses.
pub fn first_of<I>(expressions: I) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    I::Item: Into<QueryExpression>,
{
    operands("FIRST_OF", expressions).map(|ops| Combinator::FirstOf(ops).into())
}

/// Like [`and`], converting each value to text with `to_string` first.
pub fn and_with<I, F>(values: I, to_string: F) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> String,
{
    and(values.into_iter().map(to_string))
}

/// Like [`or`], converting each value to text with `to_string` first.
pub fn or_with<I, F>(values: I, to_string: F) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> String,
{
    or(values.into_iter().map(to_string))
}

/// Like [`first_of`], converting each value to text with `to_string` first.
pub fn first_of_with<I, F>(values: I, to_string: F) -> QueryResult<QueryExpression>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> String,
{
    first_of(values.into_iter().map(to_string))
}

fn operands<I>(operator: &'static str, expressions: I) -> QueryResult<Operands>
where
    I: IntoIterator,
    I::Item: Into<QueryExpression>,
{
    Operands::new(operator, expressions.into_iter().map(Into::into).collect())
}

// =============================================================================
// Prefix operators
// =============================================================================

/// Builds `NOT expression`.
pub fn not(expression: impl Into<QueryExpression>) -> QueryExpression {
    Combinator::Not(Box::new(expression.into())).into()
}

/// Builds `+expression`.
pub fn required(expression: impl Into<QueryExpression>) -> QueryExpression {
    Combinator::Required(Box::new(expression.into())).into()
}

/// Builds `-expression`.
pub fn prohibited(expression: impl Into<QueryExpression>) -> QueryExpression {
    Combinator::Prohibited(Box::new(expression.into())).into()
}

/// Selects `then` if `predicate` holds, `otherwise` if not.
pub fn ternary(
    predicate: bool,
    then: impl Into<QueryExpression>,
    otherwise: impl Into<QueryExpression>,
) -> QueryExpression {
    Combinator::Conditional {
        flag: predicate,
        then: Box::new(then.into()),
        otherwise: Box::new(otherwise.into()),
    }
    .into()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    #[test]
    fn test_term_sentinels() {
        assert_eq!(term("*"), QueryExpression::ANY);
        assert_eq!(term(""), QueryExpression::NONE);
    }

    #[test]
    fn test_term_escapes_single_token() {
        assert_eq!(term("Hello").to_string(), "Hello");
        assert_eq!(term("a:b").to_string(), "a\\:b");
        assert_eq!(term("hel*-").to_string(), "hel\\*\\-");
    }

    #[test]
    fn test_term_quotes_multiple_tokens_verbatim() {
        assert_eq!(term("hello world").to_string(), "\"hello world\"");
        assert_eq!(term("a:b c").to_string(), "\"a:b c\"");
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(wildcard("hel*").to_string(), "hel*");
        assert_eq!(wildcard("hel?").to_string(), "hel?");
        assert_eq!(wildcard("hel*-").to_string(), "hel*\\-");
        assert_eq!(wildcard("*"), QueryExpression::ANY);
        assert_eq!(wildcard(""), QueryExpression::NONE);
    }

    #[test]
    fn test_phrase_is_not_escaped() {
        assert_eq!(phrase("hel*").to_string(), "\"hel*\"");
        assert_eq!(phrase("hello world").to_string(), "\"hello world\"");
        assert_eq!(phrase("say \"hi\"").to_string(), "\"say \"hi\"\"");
    }

    #[test]
    fn test_combinators_accept_numbers() {
        assert_eq!(or([1, 2, 3]).unwrap().to_string(), "(1 OR 2 OR 3)");
        assert_eq!(not(7).to_string(), "NOT 7");
    }

    #[test]
    fn test_eq_requires_field() {
        assert_eq!(eq("", "v"), Err(QueryError::EmptyField));
    }

    #[test]
    fn test_combinators_require_two_operands() {
        let empty: [&str; 0] = [];
        assert_eq!(
            or(empty),
            Err(QueryError::TooFewOperands {
                operator: "OR",
                count: 0
            })
        );
        assert_eq!(
            and(["only"]),
            Err(QueryError::TooFewOperands {
                operator: "AND",
                count: 1
            })
        );
        assert!(first_of(["a"]).is_err());
    }

    #[test]
    fn test_with_mapper() {
        let ids = [1, 2, 3];
        let expr = or_with(ids, |id| format!("id-{}", id)).unwrap();
        assert_eq!(expr.to_string(), "(id\\-1 OR id\\-2 OR id\\-3)");

        let expr = and_with(["a b", "c"], |s| s.to_uppercase()).unwrap();
        assert_eq!(expr.to_string(), "(\"A B\" AND C)");

        let expr = first_of_with([true, false], |b| b.to_string()).unwrap();
        assert_eq!(expr.to_string(), "(true false)");
    }

    #[test]
    fn test_range_rejects_empty_bound() {
        assert!(range("", 1).is_err());
    }

    #[test]
    fn test_ternary_keeps_both_branches() {
        let expr = ternary(false, "a", "b");
        assert_eq!(expr.to_string(), "b");
        assert!(matches!(
            expr,
            QueryExpression::Combinator(Combinator::Conditional { flag: false, .. })
        ));
    }
}
