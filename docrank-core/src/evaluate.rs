//! Predicate evaluation for relevancy scoring.
//!
//! This module provides the binary match test for a single clause against a
//! single document field, together with the loose-comparison wrapper both the
//! evaluator and candidate sources use for value comparison.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, Document, datetime::DateTime};
use regex::Regex;

use crate::{error::SearchResult, spec::Clause};

/// Type-erased, comparable representation of BSON values.
///
/// This enum wraps borrowed BSON values and provides the loose comparison
/// semantics used by clause evaluation: all numeric types are normalized to
/// f64, and a string that parses as a number is equal to (and ordered
/// against) the number with that value. Everything else compares same-type.
#[derive(Debug)]
pub enum Comparable<'a> {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> Comparable<'a> {
    /// A string that parses as f64 coerces to that number for comparison.
    fn as_number(&self) -> Option<f64> {
        match self {
            Comparable::Number(value) => Some(*value),
            Comparable::String(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            // Loose numeric coercion: "5" == 5
            (Comparable::Number(a), other) => other.as_number().is_some_and(|b| *a == b),
            (this, Comparable::Number(b)) => this.as_number().is_some_and(|a| a == *b),
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            // Loose numeric coercion: "5" orders against 5
            (Comparable::Number(a), other) => {
                other.as_number().and_then(|b| a.partial_cmp(&b))
            }
            (this, Comparable::Number(b)) => {
                this.as_number().and_then(|a| a.partial_cmp(b))
            }
            _ => None,
        }
    }
}

/// Evaluates one clause against one document field, returning 0 or 1.
///
/// Fails closed: if `field` is absent from `document`, the clause scores 0
/// regardless of its shape. Mixed non-coercible types in a range test and
/// operator documents the ranker does not recognize also score 0 rather than
/// erroring.
///
/// A [`Clause::In`] scores 1 if any member is loosely equal to the field
/// value; the relevancy scorer expands set membership additively itself and
/// only uses this entry point for the per-member equality tests.
///
/// # Errors
///
/// Returns [`SearchError::PatternCompilation`](crate::error::SearchError::PatternCompilation)
/// if a `$regex` pattern (with its options applied) does not compile.
pub fn evaluate(field: &str, clause: &Clause, document: &Document) -> SearchResult<u32> {
    let Some(value) = document.get(field) else {
        return Ok(0);
    };

    let hit = match clause {
        Clause::Regex { pattern, options } => regex_match(value, pattern, options.as_deref())?,
        Clause::Range { gt, lt, gte, lte } => {
            range_match(value, gt.as_ref(), lt.as_ref(), gte.as_ref(), lte.as_ref())
        }
        Clause::In(values) => values
            .iter()
            .any(|candidate| Comparable::from(value) == Comparable::from(candidate)),
        Clause::Value(expected) => Comparable::from(value) == Comparable::from(expected),
        Clause::Unsupported(_) => false,
    };

    Ok(u32::from(hit))
}

/// Ordered match over the populated range bounds.
///
/// Priority: the combined gt+lt test, then the combined gte+lte test, then
/// the individual bounds in the order gt, lt, gte, lte. The combined forms
/// are conjunctive "between" tests: both sides must hold for the clause to
/// score at all. A range with no bounds never matches.
fn range_match(
    value: &Bson,
    gt: Option<&Bson>,
    lt: Option<&Bson>,
    gte: Option<&Bson>,
    lte: Option<&Bson>,
) -> bool {
    let value = Comparable::from(value);

    if let (Some(gt), Some(lt)) = (gt, lt) {
        return bound(&value, gt, Ordering::is_gt) && bound(&value, lt, Ordering::is_lt);
    }

    if let (Some(gte), Some(lte)) = (gte, lte) {
        return bound(&value, gte, Ordering::is_ge) && bound(&value, lte, Ordering::is_le);
    }

    if let Some(gt) = gt {
        return bound(&value, gt, Ordering::is_gt);
    }

    if let Some(lt) = lt {
        return bound(&value, lt, Ordering::is_lt);
    }

    if let Some(gte) = gte {
        return bound(&value, gte, Ordering::is_ge);
    }

    if let Some(lte) = lte {
        return bound(&value, lte, Ordering::is_le);
    }

    false
}

fn bound(value: &Comparable<'_>, bound: &Bson, accept: fn(Ordering) -> bool) -> bool {
    value
        .partial_cmp(&Comparable::from(bound))
        .is_some_and(accept)
}

/// Compiles `(?options)pattern` and tests it against the field value.
///
/// Strings match directly; numeric values match against their decimal
/// rendering; other value types never match.
fn regex_match(value: &Bson, pattern: &str, options: Option<&str>) -> SearchResult<bool> {
    let source = match options {
        Some(options) if !options.is_empty() => format!("(?{options}){pattern}"),
        _ => pattern.to_string(),
    };
    let regex = Regex::new(&source)?;

    Ok(match value {
        Bson::String(value) => regex.is_match(value),
        Bson::Int32(value) => regex.is_match(&value.to_string()),
        Bson::Int64(value) => regex.is_match(&value.to_string()),
        Bson::Double(value) => regex.is_match(&value.to_string()),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::{error::SearchError, spec::Cond};

    #[test]
    fn absent_field_fails_closed() {
        let document = doc! { "age": 5 };

        for clause in [
            Cond::eq(5),
            Cond::gt(1),
            Cond::regex("."),
            Cond::is_in([1, 2]),
        ] {
            assert_eq!(evaluate("missing", &clause, &document).unwrap(), 0);
        }
    }

    #[test]
    fn returns_only_zero_or_one() {
        let document = doc! { "age": 5, "name": "ann" };

        for (field, clause) in [
            ("age", Cond::eq(5)),
            ("age", Cond::eq(6)),
            ("age", Cond::between(1, 10)),
            ("age", Cond::is_in([5, 5, 5])),
            ("name", Cond::regex("a")),
        ] {
            let score = evaluate(field, &clause, &document).unwrap();
            assert!(score <= 1, "{field} scored {score}");
        }
    }

    #[test]
    fn loose_equality_coerces_numeric_strings() {
        let document = doc! { "count": "5", "size": 5 };

        assert_eq!(evaluate("count", &Cond::eq(5), &document).unwrap(), 1);
        assert_eq!(evaluate("size", &Cond::eq("5"), &document).unwrap(), 1);
        assert_eq!(evaluate("count", &Cond::eq(6), &document).unwrap(), 0);
        assert_eq!(evaluate("size", &Cond::eq("five"), &document).unwrap(), 0);
    }

    #[test]
    fn composite_values_compare_loosely() {
        let document = doc! { "address": { "city": "Berlin", "zip": 10115 } };

        let clause = Cond::eq(doc! { "city": "Berlin", "zip": "10115" });
        assert_eq!(evaluate("address", &clause, &document).unwrap(), 1);

        let clause = Cond::eq(doc! { "city": "Munich" });
        assert_eq!(evaluate("address", &clause, &document).unwrap(), 0);
    }

    #[test]
    fn range_conjunction_is_all_or_nothing() {
        let clause = Cond::between(1, 10);

        assert_eq!(evaluate("age", &clause, &doc! { "age": 5 }).unwrap(), 1);
        // Passing one side gives no partial credit.
        assert_eq!(evaluate("age", &clause, &doc! { "age": 15 }).unwrap(), 0);
        assert_eq!(evaluate("age", &clause, &doc! { "age": 0 }).unwrap(), 0);
    }

    #[test]
    fn inclusive_range_includes_the_bounds() {
        let clause = Cond::between_inclusive(1, 10);

        assert_eq!(evaluate("age", &clause, &doc! { "age": 1 }).unwrap(), 1);
        assert_eq!(evaluate("age", &clause, &doc! { "age": 10 }).unwrap(), 1);
        assert_eq!(evaluate("age", &clause, &doc! { "age": 11 }).unwrap(), 0);
    }

    #[test]
    fn single_bounds_evaluate_independently() {
        let document = doc! { "age": 40 };

        assert_eq!(evaluate("age", &Cond::gt(30), &document).unwrap(), 1);
        assert_eq!(evaluate("age", &Cond::lt(30), &document).unwrap(), 0);
        assert_eq!(evaluate("age", &Cond::gte(40), &document).unwrap(), 1);
        assert_eq!(evaluate("age", &Cond::lte(39), &document).unwrap(), 0);
    }

    #[test]
    fn incomparable_range_types_score_zero() {
        let document = doc! { "age": true };
        assert_eq!(evaluate("age", &Cond::gt(1), &document).unwrap(), 0);
    }

    #[test]
    fn regex_with_options_matches_case_insensitively() {
        let document = doc! { "name": "Annabel" };

        assert_eq!(evaluate("name", &Cond::regex("^ann"), &document).unwrap(), 0);
        assert_eq!(
            evaluate("name", &Cond::regex_with_options("^ann", "i"), &document).unwrap(),
            1
        );
    }

    #[test]
    fn regex_matches_the_decimal_rendering_of_numbers() {
        let document = doc! { "code": 404 };
        assert_eq!(evaluate("code", &Cond::regex("^4"), &document).unwrap(), 1);
    }

    #[test]
    fn malformed_regex_is_a_pattern_compilation_error() {
        let document = doc! { "name": "ann" };
        let err = evaluate("name", &Cond::regex("("), &document).unwrap_err();
        assert!(matches!(err, SearchError::PatternCompilation(_)));
    }

    #[test]
    fn unsupported_clause_scores_zero() {
        let clause = Clause::Unsupported(doc! { "$near": [0, 0] });
        assert_eq!(evaluate("age", &clause, &doc! { "age": 5 }).unwrap(), 0);
    }
}
