//! Query expression tree.
//!
//! A [`QueryExpression`] is an immutable value built bottom-up: leaves are
//! escaped or formatted when they are created, combinators wrap leaves or
//! other combinators, and [`QueryRenderer`](crate::QueryRenderer) walks the
//! finished tree once to produce the query string.
//!
//! ```text
//! (type:((t1 OR t2)) AND -(status:*))
//!  ^^^^^^^^^^^^^^^^^      ^^^^^^^^^^^^
//!  Field(Or)              Prohibited(Field(ANY))
//! ```

use std::borrow::Cow;

use crate::error::{QueryError, QueryResult};
use crate::range::Range;
use crate::render::QueryRenderer;

// =============================================================================
// Leaves
// =============================================================================

/// Text that is already safe to place in a query: an escaped term, a
/// wildcard pattern or a quoted phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Text {
    content: Cow<'static, str>,
}

impl Text {
    /// Matches anything: `*`.
    pub const ANY: Text = Text {
        content: Cow::Borrowed("*"),
    };

    /// Renders to nothing.
    pub const NONE: Text = Text {
        content: Cow::Borrowed(""),
    };

    /// Wraps text that has already been escaped or quoted.
    pub(crate) fn verbatim(content: impl Into<Cow<'static, str>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// Composites
// =============================================================================

/// Field binding: `name:child`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FieldRepr"))]
pub struct Field {
    name: String,
    child: Box<QueryExpression>,
}

impl Field {
    /// Binds `child` to `name`, rejecting an empty field name.
    pub fn new(name: impl Into<String>, child: impl Into<QueryExpression>) -> QueryResult<Self> {
        let name = name.into();
        if name.is_empty() {
            tracing::debug!("rejected field binding without a field name");
            return Err(QueryError::EmptyField);
        }
        Ok(Self {
            name,
            child: Box::new(child.into()),
        })
    }

    /// Field name, written as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value expression.
    pub fn child(&self) -> &QueryExpression {
        &self.child
    }
}

/// Operands of an n-ary combinator; always at least two.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Operands(Vec<QueryExpression>);

impl Operands {
    pub(crate) fn new(
        operator: &'static str,
        operands: Vec<QueryExpression>,
    ) -> QueryResult<Self> {
        if operands.len() < 2 {
            tracing::debug!(operator, count = operands.len(), "rejected combinator");
            return Err(QueryError::TooFewOperands {
                operator,
                count: operands.len(),
            });
        }
        Ok(Self(operands))
    }

    /// The operands in order.
    pub fn as_slice(&self) -> &[QueryExpression] {
        &self.0
    }

    /// Iterates over the operands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, QueryExpression> {
        self.0.iter()
    }
}

/// Operators composing one or more child expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde", serde(try_from = "CombinatorRepr"))]
pub enum Combinator {
    /// `(a AND b AND c)`
    And(Operands),
    /// `(a OR b OR c)`
    Or(Operands),
    /// Juxtaposition without a keyword: `(a +b -c)`
    FirstOf(Operands),
    /// `NOT a`
    Not(Box<QueryExpression>),
    /// `+a`
    Required(Box<QueryExpression>),
    /// `-a`
    Prohibited(Box<QueryExpression>),
    /// Renders `then` when `flag` holds, `otherwise` when it does not.
    Conditional {
        /// Selector.
        flag: bool,
        /// Chosen when `flag` is true.
        then: Box<QueryExpression>,
        /// Chosen when `flag` is false.
        otherwise: Box<QueryExpression>,
    },
}

impl Combinator {
    /// Join keyword for n-ary combinators, including surrounding spaces.
    pub(crate) fn separator(&self) -> Option<&'static str> {
        match self {
            Combinator::And(_) => Some(" AND "),
            Combinator::Or(_) => Some(" OR "),
            Combinator::FirstOf(_) => Some(" "),
            _ => None,
        }
    }

    /// Prefix token for unary combinators.
    pub(crate) fn prefix(&self) -> Option<&'static str> {
        match self {
            Combinator::Not(_) => Some("NOT "),
            Combinator::Required(_) => Some("+"),
            Combinator::Prohibited(_) => Some("-"),
            _ => None,
        }
    }
}

// =============================================================================
// Validated deserialization
// =============================================================================

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FieldRepr {
    name: String,
    child: Box<QueryExpression>,
}

#[cfg(feature = "serde")]
impl TryFrom<FieldRepr> for Field {
    type Error = QueryError;

    fn try_from(repr: FieldRepr) -> QueryResult<Self> {
        Field::new(repr.name, *repr.child)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum CombinatorRepr {
    And(Vec<QueryExpression>),
    Or(Vec<QueryExpression>),
    FirstOf(Vec<QueryExpression>),
    Not(Box<QueryExpression>),
    Required(Box<QueryExpression>),
    Prohibited(Box<QueryExpression>),
    Conditional {
        flag: bool,
        then: Box<QueryExpression>,
        otherwise: Box<QueryExpression>,
    },
}

#[cfg(feature = "serde")]
impl TryFrom<CombinatorRepr> for Combinator {
    type Error = QueryError;

    fn try_from(repr: CombinatorRepr) -> QueryResult<Self> {
        Ok(match repr {
            CombinatorRepr::And(ops) => Combinator::And(Operands::new("AND", ops)?),
            CombinatorRepr::Or(ops) => Combinator::Or(Operands::new("OR", ops)?),
            CombinatorRepr::FirstOf(ops) => Combinator::FirstOf(Operands::new("FIRST_OF", ops)?),
            CombinatorRepr::Not(op) => Combinator::Not(op),
            CombinatorRepr::Required(op) => Combinator::Required(op),
            CombinatorRepr::Prohibited(op) => Combinator::Prohibited(op),
            CombinatorRepr::Conditional {
                flag,
                then,
                otherwise,
            } => Combinator::Conditional {
                flag,
                then,
                otherwise,
            },
        })
    }
}

// =============================================================================
// Expression
// =============================================================================

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueryExpression {
    /// Escaped term, wildcard or phrase.
    Text(Text),
    /// `[from TO to]`
    Range(Range),
    /// `field:value`
    Field(Field),
    /// Boolean and prefix operators.
    Combinator(Combinator),
}

impl QueryExpression {
    /// `*`
    pub const ANY: QueryExpression = QueryExpression::Text(Text::ANY);

    /// The empty expression.
    pub const NONE: QueryExpression = QueryExpression::Text(Text::NONE);

    /// Returns true for `Text` and `Range` nodes, which render without
    /// parentheses when used as an operand.
    pub fn is_leaf(&self) -> bool {
        matches!(self, QueryExpression::Text(_) | QueryExpression::Range(_))
    }

    /// Returns true if this is the `*` text.
    pub fn is_any(&self) -> bool {
        matches!(self, QueryExpression::Text(t) if t.as_str() == "*")
    }

    /// Returns true if the expression renders to the empty string.
    pub fn is_empty(&self) -> bool {
        self.query_string().is_empty()
    }

    /// Resolves conditionals to the branch they select.
    pub fn selected(&self) -> &QueryExpression {
        match self {
            QueryExpression::Combinator(Combinator::Conditional {
                flag,
                then,
                otherwise,
            }) => {
                if *flag {
                    then.selected()
                } else {
                    otherwise.selected()
                }
            }
            other => other,
        }
    }

    /// Renders the expression in query syntax.
    pub fn query_string(&self) -> String {
        QueryRenderer::render(self)
    }
}

impl std::fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query_string())
    }
}

impl From<Text> for QueryExpression {
    fn from(text: Text) -> Self {
        QueryExpression::Text(text)
    }
}

impl From<Range> for QueryExpression {
    fn from(range: Range) -> Self {
        QueryExpression::Range(range)
    }
}

impl From<Field> for QueryExpression {
    fn from(field: Field) -> Self {
        QueryExpression::Field(field)
    }
}

impl From<Combinator> for QueryExpression {
    fn from(combinator: Combinator) -> Self {
        QueryExpression::Combinator(combinator)
    }
}

impl From<&str> for QueryExpression {
    fn from(text: &str) -> Self {
        crate::builder::term(text)
    }
}

impl From<String> for QueryExpression {
    fn from(text: String) -> Self {
        crate::builder::term(&text)
    }
}

impl From<&String> for QueryExpression {
    fn from(text: &String) -> Self {
        crate::builder::term(text)
    }
}

// numbers and booleans are lifted through their text form, so `eq("id", 42)`
// renders `id:42`
macro_rules! display_term {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryExpression {
                fn from(value: $ty) -> Self {
                    crate::builder::term(&value.to_string())
                }
            }
        )*
    };
}

display_term!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool
);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{eq, or, ternary};

    #[test]
    fn test_sentinels() {
        assert!(QueryExpression::ANY.is_any());
        assert!(QueryExpression::ANY.is_leaf());
        assert!(QueryExpression::NONE.is_empty());
        assert!(!QueryExpression::ANY.is_empty());
        assert_eq!(Text::ANY.as_str(), "*");
        assert_eq!(Text::NONE.as_str(), "");
    }

    #[test]
    fn test_is_leaf() {
        let range = QueryExpression::from(Range::new("A", "B").unwrap());
        assert!(range.is_leaf());

        let field = eq("f", "v").unwrap();
        assert!(!field.is_leaf());

        let either = or(["a", "b"]).unwrap();
        assert!(!either.is_leaf());
    }

    #[test]
    fn test_selected_resolves_nested_conditionals() {
        let inner = ternary(false, QueryExpression::ANY, "x");
        let outer = ternary(true, inner, QueryExpression::NONE);
        assert_eq!(outer.selected(), &QueryExpression::from("x"));
    }

    #[test]
    fn test_display_matches_query_string() {
        let expr = eq("field", "Hello").unwrap();
        assert_eq!(expr.to_string(), expr.query_string());
        assert_eq!(expr.to_string(), "field:Hello");
    }

    #[test]
    fn test_lift_from_string() {
        assert_eq!(QueryExpression::from("*"), QueryExpression::ANY);
        assert_eq!(QueryExpression::from(String::new()), QueryExpression::NONE);
    }

    #[test]
    fn test_field_accessors_and_validation() {
        let field = Field::new("title", "rust").unwrap();
        assert_eq!(field.name(), "title");
        assert_eq!(field.child(), &QueryExpression::from("rust"));
        assert_eq!(Field::new("", "rust"), Err(QueryError::EmptyField));
    }

    #[test]
    fn test_operands_need_two_expressions() {
        let err = Operands::new("AND", vec!["x".into()]).unwrap_err();
        assert_eq!(
            err,
            QueryError::TooFewOperands {
                operator: "AND",
                count: 1
            }
        );

        let ops = Operands::new("OR", vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(ops.as_slice().len(), 2);
        assert_eq!(ops.iter().count(), 2);
    }

    #[test]
    fn test_lift_numbers_and_booleans() {
        assert_eq!(eq("id", 42).unwrap().to_string(), "id:42");
        assert_eq!(eq("id", 42u64).unwrap().to_string(), "id:42");
        assert_eq!(eq("flag", true).unwrap().to_string(), "flag:true");
        assert_eq!(eq("score", 1.5).unwrap().to_string(), "score:1.5");
        assert_eq!(QueryExpression::from(-5).to_string(), "\\-5");
    }

    #[test]
    fn test_expressions_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryExpression>();
    }
}
