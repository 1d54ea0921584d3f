//! Wire-level query object handed to a search client.
//!
//! # Example
//!
//! ```rust
//! use solr_query::builder::{eq, range};
//! use solr_query::SortOrder;
//!
//! let query = eq("title", "rust")
//!     .unwrap()
//!     .build()
//!     .with_filter_query(&eq("year", range(2020, "*").unwrap()).unwrap())
//!     .with_sort("score", SortOrder::Desc)
//!     .with_rows(20);
//!
//! assert_eq!(
//!     query.params(),
//!     vec![
//!         ("q", "title:rust".to_string()),
//!         ("fq", "year:[2020 TO *]".to_string()),
//!         ("sort", "score desc".to_string()),
//!         ("rows", "20".to_string()),
//!     ]
//! );
//! ```

use crate::ast::QueryExpression;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Request parameters for a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolrQuery {
    /// Main query (`q`).
    pub q: String,
    /// Filter queries (`fq`), one parameter each.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub filter_queries: Vec<String>,
    /// Returned fields (`fl`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub fields: Vec<String>,
    /// Sort clauses (`sort`), in priority order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub sort: Vec<(String, SortOrder)>,
    /// Offset of the first result (`start`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub start: Option<u64>,
    /// Page size (`rows`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rows: Option<u64>,
    /// Default search field (`df`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub default_field: Option<String>,
}

impl SolrQuery {
    /// Creates a query with the given `q` string.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Adds a filter query. Expressions that render empty are skipped.
    pub fn with_filter_query(mut self, filter: &QueryExpression) -> Self {
        let fq = filter.query_string();
        if !fq.is_empty() {
            self.filter_queries.push(fq);
        }
        self
    }

    /// Adds a returned field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Appends a sort clause.
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((field.into(), order));
        self
    }

    /// Sets the result offset.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the page size.
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the default search field.
    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    /// Request parameters in a stable order. `q` is always present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.clone())];

        for fq in &self.filter_queries {
            params.push(("fq", fq.clone()));
        }
        if !self.fields.is_empty() {
            params.push(("fl", self.fields.join(",")));
        }
        if !self.sort.is_empty() {
            let sort: Vec<String> = self
                .sort
                .iter()
                .map(|(field, order)| format!("{} {}", field, order))
                .collect();
            params.push(("sort", sort.join(",")));
        }
        if let Some(start) = self.start {
            params.push(("start", start.to_string()));
        }
        if let Some(rows) = self.rows {
            params.push(("rows", rows.to_string()));
        }
        if let Some(ref df) = self.default_field {
            params.push(("df", df.clone()));
        }

        params
    }
}

impl QueryExpression {
    /// Wraps the rendered expression into a [`SolrQuery`].
    pub fn build(&self) -> SolrQuery {
        let q = self.query_string();
        tracing::debug!(q = %q, "built query");
        SolrQuery::new(q)
    }
}

impl From<&QueryExpression> for SolrQuery {
    fn from(expr: &QueryExpression) -> Self {
        expr.build()
    }
}
