//! # solr-query
//!
//! A builder for Lucene/Solr query strings.
//!
//! Expressions are composed bottom-up from leaves (terms, wildcards,
//! phrases, ranges) and combinators (`AND`, `OR`, `NOT`, `+`, `-`,
//! field bindings), then rendered once into a correctly escaped and
//! parenthesized query string.
//!
//! ## Usage
//!
//! ```rust
//! use solr_query::builder::{eq, first_of, not, or, range, required, wildcard};
//!
//! let q = eq("field", "Hello").unwrap();
//! assert_eq!(q.to_string(), "field:Hello");
//!
//! let q = or([eq("field", "lucene").unwrap(), "solr".into()]).unwrap();
//! assert_eq!(q.to_string(), "(field:lucene OR solr)");
//!
//! let q = first_of([required("lucene"), not("solr")]).unwrap();
//! assert_eq!(q.to_string(), "(+lucene NOT solr)");
//!
//! let q = range("*", 300000).unwrap();
//! assert_eq!(q.to_string(), "[* TO 300000]");
//!
//! assert_eq!(wildcard("hel*-").to_string(), "hel*\\-");
//! ```
//!
//! ## Syntax Quick Reference
//!
//! | Builder | Output |
//! |---------|--------|
//! | `term("a b")` | `"a b"` |
//! | `term("a:b")` | `a\:b` |
//! | `wildcard("ab*")` | `ab*` |
//! | `phrase("ab*")` | `"ab*"` |
//! | `range(1, "*")` | `[1 TO *]` |
//! | `eq("f", "v")` | `f:v` |
//! | `and(["a", "b"])` | `(a AND b)` |
//! | `or(["a", "b"])` | `(a OR b)` |
//! | `first_of(["a", "b"])` | `(a b)` |
//! | `not("a")` | `NOT a` |
//! | `required("a")` | `+a` |
//! | `prohibited("a")` | `-a` |
//! | `eq("*", any())` | `*:*` |
//!
//! ## Feature Flags
//!
//! - `serde` - Derives `Serialize`/`Deserialize` for the expression model
//!   and [`SolrQuery`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
pub mod builder;
mod error;
pub mod escape;
mod params;
mod range;
mod render;

pub use ast::{Combinator, Field, Operands, QueryExpression, Text};
pub use error::{BoundSide, QueryError, QueryResult};
pub use params::{SolrQuery, SortOrder};
pub use range::{format_date, Bound, Range};
pub use render::QueryRenderer;
