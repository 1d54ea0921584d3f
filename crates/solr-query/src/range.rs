//! Range bounds and their wire formatting.
//!
//! A range renders as `[from TO to]`. Each side is formatted on its own and
//! may independently be the unbounded sentinel `*`.
//!
//! | Bound | Rendered |
//! |-------|----------|
//! | Date | `2013-02-17T00:00:00.000Z` |
//! | Integer | `300000` |
//! | Decimal | `2.5` |
//! | Token | `NOW`, `B` (verbatim) |
//! | Unbounded | `*` |

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{BoundSide, QueryError, QueryResult};

/// Date pattern understood by the search engine's date range parser.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formats a date as UTC ISO-8601 with millisecond precision and a literal `Z`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One side of a range expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound {
    /// A point in time, always rendered in UTC.
    Date(DateTime<Utc>),
    /// Integral value. Wide enough for every primitive integer up to `u64`.
    Integer(i128),
    /// Floating point value.
    Decimal(f64),
    /// Token passed through verbatim, e.g. `NOW` or `NOW-1DAY`.
    Token(String),
    /// Open bound: `*`.
    Unbounded,
}

impl Bound {
    /// Checks that the bound can be rendered.
    pub(crate) fn validate(&self, side: BoundSide) -> QueryResult<()> {
        match self {
            Bound::Token(token) if token.is_empty() => Err(QueryError::EmptyBound { side }),
            Bound::Decimal(value) if !value.is_finite() => Err(QueryError::InvalidBound {
                side,
                value: value.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Returns true for the `*` sentinel.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Date(date) => write!(f, "{}", format_date(date)),
            Bound::Integer(n) => write!(f, "{}", n),
            Bound::Decimal(n) => write!(f, "{}", n),
            Bound::Token(token) => write!(f, "{}", token),
            Bound::Unbounded => write!(f, "*"),
        }
    }
}

impl From<DateTime<Utc>> for Bound {
    fn from(date: DateTime<Utc>) -> Self {
        Bound::Date(date)
    }
}

impl From<NaiveDateTime> for Bound {
    fn from(date: NaiveDateTime) -> Self {
        Bound::Date(date.and_utc())
    }
}

impl From<NaiveDate> for Bound {
    fn from(date: NaiveDate) -> Self {
        Bound::Date(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl From<&str> for Bound {
    fn from(token: &str) -> Self {
        Bound::from(token.to_string())
    }
}

impl From<String> for Bound {
    fn from(token: String) -> Self {
        if token == "*" {
            Bound::Unbounded
        } else {
            Bound::Token(token)
        }
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        Bound::Decimal(value)
    }
}

impl From<f32> for Bound {
    fn from(value: f32) -> Self {
        Bound::Decimal(f64::from(value))
    }
}

macro_rules! integer_bound {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Bound {
                fn from(value: $ty) -> Self {
                    Bound::Integer(i128::from(value))
                }
            }
        )*
    };
}

integer_bound!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

// no lossless From impl exists for pointer-sized integers
impl From<isize> for Bound {
    fn from(value: isize) -> Self {
        Bound::Integer(value as i128)
    }
}

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Bound::Integer(value as i128)
    }
}

impl TryFrom<u128> for Bound {
    type Error = std::num::TryFromIntError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        i128::try_from(value).map(Bound::Integer)
    }
}

/// Inclusive range `[from TO to]`.
///
/// Bounds are validated by [`Range::new`]; deserialization goes through the
/// same checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RangeRepr"))]
pub struct Range {
    from: Bound,
    to: Bound,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RangeRepr {
    from: Bound,
    to: Bound,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeRepr> for Range {
    type Error = QueryError;

    fn try_from(repr: RangeRepr) -> QueryResult<Self> {
        Range::new(repr.from, repr.to)
    }
}

impl Range {
    /// Creates a range, rejecting empty or non-representable bounds.
    pub fn new(from: impl Into<Bound>, to: impl Into<Bound>) -> QueryResult<Self> {
        let from = from.into();
        let to = to.into();
        from.validate(BoundSide::From)?;
        to.validate(BoundSide::To)?;
        Ok(Self { from, to })
    }

    /// Lower (`from`) bound.
    pub fn lower(&self) -> &Bound {
        &self.from
    }

    /// Upper (`to`) bound.
    pub fn upper(&self) -> &Bound {
        &self.to
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} TO {}]", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_format_date_millis() {
        let dt = Utc.with_ymd_and_hms(2013, 2, 17, 8, 30, 5).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_date(&dt), "2013-02-17T08:30:05.042Z");
    }

    #[test]
    fn test_naive_date_is_midnight_utc() {
        let bound = Bound::from(date(2013, 2, 17));
        assert_eq!(bound.to_string(), "2013-02-17T00:00:00.000Z");
    }

    #[test]
    fn test_star_is_unbounded() {
        assert!(Bound::from("*").is_unbounded());
        assert!(!Bound::from("NOW").is_unbounded());
        assert_eq!(Bound::from("NOW").to_string(), "NOW");
    }

    #[test]
    fn test_range_display() {
        let range = Range::new(date(2013, 2, 17), date(2013, 2, 18)).unwrap();
        assert_eq!(
            range.to_string(),
            "[2013-02-17T00:00:00.000Z TO 2013-02-18T00:00:00.000Z]"
        );
    }

    #[test]
    fn test_range_open_bounds() {
        assert_eq!(Range::new("*", 300000).unwrap().to_string(), "[* TO 300000]");
        assert_eq!(Range::new(300000, "*").unwrap().to_string(), "[300000 TO *]");
        assert_eq!(Range::new("*", "*").unwrap().to_string(), "[* TO *]");
    }

    #[test]
    fn test_range_wide_integers() {
        let range = Range::new(0usize, u64::MAX).unwrap();
        assert_eq!(range.to_string(), "[0 TO 18446744073709551615]");
        assert_eq!(range.lower(), &Bound::Integer(0));

        let range = Range::new(i64::MIN, -1isize).unwrap();
        assert_eq!(range.to_string(), "[-9223372036854775808 TO -1]");
    }

    #[test]
    fn test_u128_bound_overflow() {
        assert_eq!(Bound::try_from(42u128), Ok(Bound::Integer(42)));
        assert!(Bound::try_from(u128::MAX).is_err());
    }

    #[test]
    fn test_range_decimal() {
        assert_eq!(Range::new(1.5, 2.25).unwrap().to_string(), "[1.5 TO 2.25]");
    }

    #[test]
    fn test_range_rejects_empty_bound() {
        assert_eq!(
            Range::new("", "C"),
            Err(QueryError::EmptyBound {
                side: BoundSide::From
            })
        );
        assert_eq!(
            Range::new("B", ""),
            Err(QueryError::EmptyBound { side: BoundSide::To })
        );
    }

    #[test]
    fn test_range_rejects_non_finite_decimal() {
        let err = Range::new(0, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidBound {
                side: BoundSide::To,
                ..
            }
        ));
    }
}
