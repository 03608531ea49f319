//! Search specification model for relevancy-ranked queries.
//!
//! This module provides the tagged clause model that relevancy scoring walks,
//! along with fluent construction helpers and conversions to and from the
//! literal filter syntax used by document stores.
//!
//! # Building a spec
//!
//! Specs can be constructed using the fluent API together with the [`Cond`]
//! helper:
//!
//! ```ignore
//! use docrank::spec::{SearchSpec, Cond};
//!
//! let spec = SearchSpec::new()
//!     .field("age", Cond::gte(30))
//!     .field("name", Cond::regex_with_options("^ann", "i"))
//!     .any_of(vec![
//!         SearchSpec::new().field("role", Cond::eq("admin")),
//!         SearchSpec::new().field("role", Cond::eq("owner")),
//!     ]);
//! ```
//!
//! # Literal filter interop
//!
//! The spec language is a structural mirror of the store's own filter syntax
//! (`$or`, `$gt`, `$lt`, `$gte`, `$lte`, `$in`, `$regex`), so callers can reuse
//! the same literal query documents for ranking as for native lookups:
//!
//! ```ignore
//! use bson::doc;
//! use docrank::spec::SearchSpec;
//!
//! let spec = SearchSpec::from_filter_document(&doc! {
//!     "age": { "$gte": 30 },
//!     "$or": [ { "name": "Bob" } ],
//! })?;
//! let filter = spec.to_filter_document(); // usable with the store's find()
//! ```

use bson::{Bson, Document, doc};

use crate::error::{SearchError, SearchResult};

/// One field's match condition within a search specification.
///
/// Clauses form a tagged union resolved by pattern match during evaluation.
/// The variants deliberately mirror the operator shapes of the store's filter
/// language; anything the ranker does not understand is preserved as
/// [`Clause::Unsupported`] and scores zero rather than erroring.
#[derive(Debug, Clone)]
pub enum Clause {
    /// A scalar or composite value compared with loose equality.
    ///
    /// The loose-equality rule is documented on the evaluator: all BSON
    /// numerics compare as `f64`, and a string that parses as a number is
    /// equal to the number with that value.
    Value(Bson),
    /// Set membership (`$in`). During scoring, each candidate value is
    /// evaluated as an independent equality clause and scores accumulate per
    /// matching member.
    In(Vec<Bson>),
    /// A range clause with at least one bound populated.
    ///
    /// When both `gt` and `lt` (or both `gte` and `lte`) are present, the
    /// clause is a single conjunctive "between" test; otherwise the first
    /// populated bound is evaluated alone, in the order `gt`, `lt`, `gte`,
    /// `lte`. A range with no bounds scores zero.
    Range {
        /// Exclusive lower bound (`$gt`).
        gt: Option<Bson>,
        /// Exclusive upper bound (`$lt`).
        lt: Option<Bson>,
        /// Inclusive lower bound (`$gte`).
        gte: Option<Bson>,
        /// Inclusive upper bound (`$lte`).
        lte: Option<Bson>,
    },
    /// A regular-expression clause (`$regex`, with optional `$options` flags
    /// appended as inline modifiers).
    Regex {
        /// The pattern source, compiled at evaluation time.
        pattern: String,
        /// Optional modifier flags (e.g. `"i"`), mapped to an inline
        /// `(?flags)` group.
        options: Option<String>,
    },
    /// An operator document the ranker does not recognize. Always scores zero.
    Unsupported(Document),
}

impl Clause {
    /// Parses a literal filter value into a clause.
    ///
    /// A document containing `$`-prefixed keys is treated as an operator
    /// clause; recognized operators win in the order regex > range > in, and
    /// a document holding only unrecognized operators becomes
    /// [`Clause::Unsupported`]. Any other value (including a plain embedded
    /// document) is a loose-equality [`Clause::Value`].
    pub fn from_filter_value(value: &Bson) -> SearchResult<Self> {
        let operators = match value {
            Bson::Document(operators) if operators.keys().any(|k| k.starts_with('$')) => operators,
            other => return Ok(Clause::Value(other.clone())),
        };

        if let Some(pattern) = operators.get("$regex") {
            let Bson::String(pattern) = pattern else {
                return Err(SearchError::InvalidFilter(format!(
                    "$regex pattern must be a string, got {pattern}"
                )));
            };

            let options = match operators.get("$options") {
                Some(Bson::String(options)) => Some(options.clone()),
                _ => None,
            };

            return Ok(Clause::Regex { pattern: pattern.clone(), options });
        }

        if ["$gt", "$lt", "$gte", "$lte"]
            .iter()
            .any(|op| operators.contains_key(op))
        {
            return Ok(Clause::Range {
                gt: operators.get("$gt").cloned(),
                lt: operators.get("$lt").cloned(),
                gte: operators.get("$gte").cloned(),
                lte: operators.get("$lte").cloned(),
            });
        }

        if let Some(Bson::Array(values)) = operators.get("$in") {
            return Ok(Clause::In(values.clone()));
        }

        Ok(Clause::Unsupported(operators.clone()))
    }

    /// Renders this clause back to its literal filter value.
    pub fn to_filter_value(&self) -> Bson {
        match self {
            Clause::Value(value) => value.clone(),
            Clause::In(values) => Bson::Document(doc! { "$in": values.clone() }),
            Clause::Range { gt, lt, gte, lte } => {
                let mut operators = Document::new();

                if let Some(gt) = gt {
                    operators.insert("$gt", gt.clone());
                }
                if let Some(lt) = lt {
                    operators.insert("$lt", lt.clone());
                }
                if let Some(gte) = gte {
                    operators.insert("$gte", gte.clone());
                }
                if let Some(lte) = lte {
                    operators.insert("$lte", lte.clone());
                }

                Bson::Document(operators)
            }
            Clause::Regex { pattern, options } => {
                let mut operators = doc! { "$regex": pattern.clone() };

                if let Some(options) = options {
                    operators.insert("$options", options.clone());
                }

                Bson::Document(operators)
            }
            Clause::Unsupported(operators) => Bson::Document(operators.clone()),
        }
    }
}

/// One entry of a search specification, in specification order.
///
/// The disjunction marker (`$or`) is a distinct variant rather than a reserved
/// field name, so dispatch during scoring is a pattern match instead of
/// string sniffing.
#[derive(Debug, Clone)]
pub enum SpecEntry {
    /// A named field with its match condition.
    Field {
        /// The document field the clause is evaluated against. Lookups are
        /// direct key access; dotted paths are not resolved.
        name: String,
        /// The match condition.
        clause: Clause,
    },
    /// A disjunction of alternative sub-specifications. Every branch is fully
    /// scored and the branch scores are **summed** (not maxed), so a document
    /// matching several alternatives outranks one matching a single branch.
    AnyOf(Vec<SearchSpec>),
}

/// An ordered search specification for relevancy scoring.
///
/// Entries are walked in specification order; duplicate field names are
/// allowed and each contributes independently. A spec is immutable once
/// scoring begins and may nest arbitrarily through [`SpecEntry::AnyOf`].
#[derive(Debug, Clone, Default)]
pub struct SearchSpec {
    entries: Vec<SpecEntry>,
}

impl SearchSpec {
    /// Creates a new empty specification.
    pub fn new() -> Self {
        SearchSpec { entries: Vec::new() }
    }

    /// Appends a field clause to this specification.
    pub fn field(mut self, name: impl Into<String>, clause: Clause) -> Self {
        self.entries.push(SpecEntry::Field { name: name.into(), clause });
        self
    }

    /// Appends a disjunction of alternative sub-specifications.
    pub fn any_of(mut self, branches: impl IntoIterator<Item = SearchSpec>) -> Self {
        self.entries
            .push(SpecEntry::AnyOf(branches.into_iter().collect()));
        self
    }

    /// Returns the entries of this specification in specification order.
    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    /// Returns `true` if this specification has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a literal filter document into a specification.
    ///
    /// The reserved `$or` key becomes a [`SpecEntry::AnyOf`]; every other key
    /// is a field entry parsed via [`Clause::from_filter_value`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidFilter`] if `$or` is not an array of
    /// documents or a `$regex` pattern is not a string.
    pub fn from_filter_document(filter: &Document) -> SearchResult<Self> {
        let mut entries = Vec::with_capacity(filter.len());

        for (key, value) in filter {
            if key == "$or" {
                let Bson::Array(branches) = value else {
                    return Err(SearchError::InvalidFilter(format!(
                        "$or must be an array of documents, got {value}"
                    )));
                };

                let branches = branches
                    .iter()
                    .map(|branch| match branch {
                        Bson::Document(branch) => Self::from_filter_document(branch),
                        other => Err(SearchError::InvalidFilter(format!(
                            "$or branch must be a document, got {other}"
                        ))),
                    })
                    .collect::<SearchResult<Vec<_>>>()?;

                entries.push(SpecEntry::AnyOf(branches));
            } else {
                entries.push(SpecEntry::Field {
                    name: key.clone(),
                    clause: Clause::from_filter_value(value)?,
                });
            }
        }

        Ok(SearchSpec { entries })
    }

    /// Renders this specification as a literal filter document, suitable for
    /// the store's native lookup mechanism.
    ///
    /// Duplicate field names collapse to the last occurrence, since filter
    /// documents key clauses by field name.
    pub fn to_filter_document(&self) -> Document {
        let mut filter = Document::new();

        for entry in &self.entries {
            match entry {
                SpecEntry::Field { name, clause } => {
                    filter.insert(name.clone(), clause.to_filter_value());
                }
                SpecEntry::AnyOf(branches) => {
                    filter.insert(
                        "$or",
                        branches
                            .iter()
                            .map(|branch| Bson::Document(branch.to_filter_document()))
                            .collect::<Vec<_>>(),
                    );
                }
            }
        }

        filter
    }
}

/// Helper struct for constructing clauses.
///
/// Provides static methods to construct the recognized clause shapes in a
/// type-safe manner. All methods accept values as `Into<Bson>` for ergonomics.
///
/// # Example
///
/// ```ignore
/// use docrank::spec::{SearchSpec, Cond};
///
/// let spec = SearchSpec::new()
///     .field("age", Cond::between(18, 65))
///     .field("tags", Cond::is_in(["rust", "search"]));
/// ```
pub struct Cond;

impl Cond {
    /// Creates a loose-equality clause.
    pub fn eq(value: impl Into<Bson>) -> Clause {
        Clause::Value(value.into())
    }

    /// Creates a set-membership clause (`$in`).
    pub fn is_in<V: Into<Bson>>(values: impl IntoIterator<Item = V>) -> Clause {
        Clause::In(values.into_iter().map(Into::into).collect())
    }

    /// Creates a strict greater-than clause (`$gt`).
    pub fn gt(value: impl Into<Bson>) -> Clause {
        Clause::Range { gt: Some(value.into()), lt: None, gte: None, lte: None }
    }

    /// Creates a strict less-than clause (`$lt`).
    pub fn lt(value: impl Into<Bson>) -> Clause {
        Clause::Range { gt: None, lt: Some(value.into()), gte: None, lte: None }
    }

    /// Creates a greater-than-or-equal clause (`$gte`).
    pub fn gte(value: impl Into<Bson>) -> Clause {
        Clause::Range { gt: None, lt: None, gte: Some(value.into()), lte: None }
    }

    /// Creates a less-than-or-equal clause (`$lte`).
    pub fn lte(value: impl Into<Bson>) -> Clause {
        Clause::Range { gt: None, lt: None, gte: None, lte: Some(value.into()) }
    }

    /// Creates a strict between clause (`$gt` + `$lt`), evaluated as a single
    /// conjunctive test.
    pub fn between(lower: impl Into<Bson>, upper: impl Into<Bson>) -> Clause {
        Clause::Range {
            gt: Some(lower.into()),
            lt: Some(upper.into()),
            gte: None,
            lte: None,
        }
    }

    /// Creates an inclusive between clause (`$gte` + `$lte`), evaluated as a
    /// single conjunctive test.
    pub fn between_inclusive(lower: impl Into<Bson>, upper: impl Into<Bson>) -> Clause {
        Clause::Range {
            gt: None,
            lt: None,
            gte: Some(lower.into()),
            lte: Some(upper.into()),
        }
    }

    /// Creates a regular-expression clause.
    pub fn regex(pattern: impl Into<String>) -> Clause {
        Clause::Regex { pattern: pattern.into(), options: None }
    }

    /// Creates a regular-expression clause with modifier flags (e.g. `"i"`).
    pub fn regex_with_options(pattern: impl Into<String>, options: impl Into<String>) -> Clause {
        Clause::Regex {
            pattern: pattern.into(),
            options: Some(options.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operator_documents_into_tagged_clauses() {
        let spec = SearchSpec::from_filter_document(&doc! {
            "age": { "$gte": 30, "$lte": 50 },
            "name": { "$regex": "^a", "$options": "i" },
            "tags": { "$in": ["x", "y"] },
            "plain": "value",
            "$or": [ { "role": "admin" } ],
        })
        .unwrap();

        let entries = spec.entries();
        assert_eq!(entries.len(), 5);

        assert!(matches!(
            &entries[0],
            SpecEntry::Field { name, clause: Clause::Range { gte: Some(_), lte: Some(_), gt: None, lt: None } } if name == "age"
        ));
        assert!(matches!(
            &entries[1],
            SpecEntry::Field { clause: Clause::Regex { options: Some(o), .. }, .. } if o == "i"
        ));
        assert!(matches!(
            &entries[2],
            SpecEntry::Field { clause: Clause::In(values), .. } if values.len() == 2
        ));
        assert!(matches!(
            &entries[3],
            SpecEntry::Field { clause: Clause::Value(Bson::String(_)), .. }
        ));
        assert!(matches!(&entries[4], SpecEntry::AnyOf(branches) if branches.len() == 1));
    }

    #[test]
    fn plain_embedded_document_is_a_composite_value() {
        let clause = Clause::from_filter_value(&Bson::Document(doc! { "city": "Berlin" })).unwrap();
        assert!(matches!(clause, Clause::Value(Bson::Document(_))));
    }

    #[test]
    fn unknown_operators_parse_to_unsupported() {
        let clause = Clause::from_filter_value(&Bson::Document(doc! { "$near": [0, 0] })).unwrap();
        assert!(matches!(clause, Clause::Unsupported(_)));
    }

    #[test]
    fn malformed_or_is_an_invalid_filter() {
        let err = SearchSpec::from_filter_document(&doc! { "$or": "nope" }).unwrap_err();
        assert!(matches!(err, SearchError::InvalidFilter(_)));

        let err = SearchSpec::from_filter_document(&doc! { "$or": ["nope"] }).unwrap_err();
        assert!(matches!(err, SearchError::InvalidFilter(_)));
    }

    #[test]
    fn filter_document_round_trips() {
        let filter = doc! {
            "age": { "$gt": 1, "$lt": 10 },
            "name": { "$regex": "ann" },
            "tags": { "$in": [1, 2, 3] },
            "$or": [ { "role": "admin" }, { "role": "owner" } ],
        };

        let spec = SearchSpec::from_filter_document(&filter).unwrap();
        assert_eq!(spec.to_filter_document(), filter);
    }

    #[test]
    fn builder_renders_the_same_filter_as_the_literal() {
        let spec = SearchSpec::new()
            .field("age", Cond::between(1, 10))
            .any_of(vec![SearchSpec::new().field("name", Cond::eq("Bob"))]);

        assert_eq!(
            spec.to_filter_document(),
            doc! {
                "age": { "$gt": 1, "$lt": 10 },
                "$or": [ { "name": "Bob" } ],
            }
        );
    }
}
