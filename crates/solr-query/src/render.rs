//! Rendering of expression trees into query syntax.
//!
//! Operand rules:
//! - `Text` and `Range` operands render bare: `field:value`, `-[A TO B]`.
//! - `Field` and `Combinator` operands of a field binding or prefix operator
//!   get one extra pair of parentheses, so a nested `OR` reads
//!   `type:((t1 OR t2))`.
//! - An operand that renders empty drops the whole branch, prefix included.
//! - Conditionals are transparent and render as the branch they select.

use super::ast::{Combinator, Field, QueryExpression};

/// Renders [`QueryExpression`] trees.
#[derive(Debug, Clone, Default)]
pub struct QueryRenderer {
    _private: (),
}

impl QueryRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render an expression.
    pub fn to_query(&self, expr: &QueryExpression) -> String {
        Self::render(expr)
    }

    /// Render an expression (static method).
    pub fn render(expr: &QueryExpression) -> String {
        match expr {
            QueryExpression::Text(text) => text.as_str().to_string(),
            QueryExpression::Range(range) => range.to_string(),
            QueryExpression::Field(field) => Self::render_field(field),
            QueryExpression::Combinator(combinator) => Self::render_combinator(combinator),
        }
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    fn render_field(field: &Field) -> String {
        Self::prefixed(field.child(), &format!("{}:", field.name()))
    }

    fn render_combinator(combinator: &Combinator) -> String {
        match combinator {
            Combinator::And(operands) | Combinator::Or(operands) | Combinator::FirstOf(operands) => {
                // separator() is Some for every n-ary variant
                let separator = combinator.separator().unwrap_or(" ");
                Self::join(operands.as_slice(), separator)
            }
            Combinator::Not(operand)
            | Combinator::Required(operand)
            | Combinator::Prohibited(operand) => {
                let prefix = combinator.prefix().unwrap_or_default();
                Self::prefixed(operand, prefix)
            }
            Combinator::Conditional {
                flag,
                then,
                otherwise,
            } => {
                if *flag {
                    Self::render(then)
                } else {
                    Self::render(otherwise)
                }
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Joins the non-empty operands and wraps the result in parentheses.
    fn join(operands: &[QueryExpression], separator: &str) -> String {
        let parts: Vec<String> = operands
            .iter()
            .map(Self::render)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return String::new();
        }
        format!("({})", parts.join(separator))
    }

    /// Renders `operand` behind `prefix`, or nothing when the operand is empty.
    fn prefixed(operand: &QueryExpression, prefix: &str) -> String {
        let rendered = Self::operand(operand);
        if rendered.is_empty() {
            return rendered;
        }
        format!("{}{}", prefix, rendered)
    }

    /// Renders an operand of a field binding or prefix operator.
    fn operand(expr: &QueryExpression) -> String {
        let expr = expr.selected();
        let rendered = Self::render(expr);
        if rendered.is_empty() || expr.is_leaf() {
            rendered
        } else {
            format!("({})", rendered)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
