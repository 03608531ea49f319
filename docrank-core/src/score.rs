//! Relevancy scoring of documents against a search specification.
//!
//! Scoring counts matched clauses rather than short-circuiting: a document
//! matching five clauses outranks one matching a single clause. Disjunction
//! branches and set members are additive, so a score can exceed the number of
//! top-level entries. All accumulator and match-tracking state is local to
//! one scoring call; nothing is cached between calls.

use bson::{Bson, Document};
use serde::Serialize;

use crate::{
    error::SearchResult,
    evaluate::evaluate,
    spec::{Clause, SearchSpec, SpecEntry},
};

/// A document annotated with its relevancy score.
///
/// `matches` lists the field names that contributed to the score, in
/// evaluation order, and is populated only when match tracking was requested.
/// A field name appears once per matching condition, so `$in` clauses with
/// several matching members repeat the name.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    /// The candidate document, unchanged.
    pub document: Bson,
    /// Count of matched clauses, including per-branch and per-member hits.
    pub relevancy: u32,
    /// Matched field names, when tracking was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
}

/// Accumulates the relevancy score of one document against a specification.
///
/// The scorer borrows the document for the duration of one scoring call and
/// optionally records which fields matched. Construct a fresh scorer per
/// document; scoring is pure and calls are independent.
pub struct RelevancyScorer<'a> {
    document: &'a Document,
    matches: Option<Vec<String>>,
}

impl<'a> RelevancyScorer<'a> {
    /// Creates a scorer for one document. When `track_matches` is set, the
    /// names of matching fields are recorded for retrieval via
    /// [`into_matches`](Self::into_matches).
    pub fn new(document: &'a Document, track_matches: bool) -> Self {
        Self {
            document,
            matches: track_matches.then(Vec::new),
        }
    }

    /// Walks the specification in order and returns the accumulated score.
    ///
    /// Disjunction branches are scored recursively against the same document
    /// and their scores are summed — never maxed. This rewards documents
    /// matching multiple alternative branches and is load-bearing for ranking
    /// quality, even though it deviates from strict boolean OR. Set-membership
    /// clauses likewise accumulate one point per matching member.
    ///
    /// # Errors
    ///
    /// A malformed `$regex` pattern aborts scoring with
    /// [`SearchError::PatternCompilation`](crate::error::SearchError::PatternCompilation);
    /// no partial score is returned.
    pub fn score(&mut self, spec: &SearchSpec) -> SearchResult<u32> {
        let mut total = 0;

        for entry in spec.entries() {
            match entry {
                SpecEntry::AnyOf(branches) => {
                    for branch in branches {
                        total += self.score(branch)?;
                    }
                }
                SpecEntry::Field { name, clause: Clause::In(values) } => {
                    // Each member is an independent equality test; duplicate
                    // members that match keep accumulating.
                    for value in values {
                        total += self.tally(name, &Clause::Value(value.clone()))?;
                    }
                }
                SpecEntry::Field { name, clause } => {
                    total += self.tally(name, clause)?;
                }
            }
        }

        Ok(total)
    }

    /// Consumes the scorer, returning the recorded matches (if tracking was
    /// requested).
    pub fn into_matches(self) -> Option<Vec<String>> {
        self.matches
    }

    fn tally(&mut self, field: &str, clause: &Clause) -> SearchResult<u32> {
        let hit = evaluate(field, clause, self.document)?;

        if hit == 1 {
            if let Some(matches) = &mut self.matches {
                matches.push(field.to_string());
            }
        }

        Ok(hit)
    }
}

/// Scores one document against a specification without match tracking.
///
/// Convenience wrapper over [`RelevancyScorer`] for callers that only need
/// the number.
pub fn score_document(spec: &SearchSpec, document: &Document) -> SearchResult<u32> {
    RelevancyScorer::new(document, false).score(spec)
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::spec::Cond;

    #[test]
    fn counts_independent_clauses() {
        let spec = SearchSpec::new()
            .field("age", Cond::gte(30))
            .field("name", Cond::eq("Bob"))
            .field("city", Cond::eq("Berlin"));

        let document = doc! { "age": 40, "name": "Bob", "city": "Rome" };
        assert_eq!(score_document(&spec, &document).unwrap(), 2);
    }

    #[test]
    fn disjunction_branches_sum_rather_than_max() {
        let a = SearchSpec::new().field("name", Cond::eq("Bob"));
        let b = SearchSpec::new().field("age", Cond::gt(30));
        let document = doc! { "name": "Bob", "age": 40 };

        let combined = SearchSpec::new().any_of(vec![a.clone(), b.clone()]);

        let sum = score_document(&a, &document).unwrap() + score_document(&b, &document).unwrap();
        assert_eq!(score_document(&combined, &document).unwrap(), sum);
        assert_eq!(sum, 2);
    }

    #[test]
    fn duplicate_in_members_accumulate() {
        let spec = SearchSpec::new().field("tag", Cond::is_in(["x", "x"]));
        let document = doc! { "tag": "x" };

        assert_eq!(score_document(&spec, &document).unwrap(), 2);
    }

    #[test]
    fn score_can_exceed_the_number_of_top_level_entries() {
        let spec = SearchSpec::new()
            .field("tag", Cond::is_in(["x", "x", "x"]))
            .any_of(vec![
                SearchSpec::new().field("age", Cond::gt(1)),
                SearchSpec::new().field("age", Cond::lt(100)),
            ]);

        let document = doc! { "tag": "x", "age": 40 };
        assert_eq!(score_document(&spec, &document).unwrap(), 5);
    }

    #[test]
    fn nested_disjunctions_recurse() {
        let spec = SearchSpec::new().any_of(vec![
            SearchSpec::new().any_of(vec![
                SearchSpec::new().field("name", Cond::eq("Bob")),
            ]),
            SearchSpec::new().field("name", Cond::eq("Bob")),
        ]);

        let document = doc! { "name": "Bob" };
        assert_eq!(score_document(&spec, &document).unwrap(), 2);
    }

    #[test]
    fn matches_record_fields_once_per_matching_condition() {
        let spec = SearchSpec::new()
            .field("age", Cond::gte(30))
            .field("tag", Cond::is_in(["x", "y", "x"]))
            .field("name", Cond::eq("nope"));

        let document = doc! { "age": 40, "tag": "x", "name": "Bob" };

        let mut scorer = RelevancyScorer::new(&document, true);
        assert_eq!(scorer.score(&spec).unwrap(), 3);
        assert_eq!(
            scorer.into_matches().unwrap(),
            vec!["age".to_string(), "tag".to_string(), "tag".to_string()],
        );
    }

    #[test]
    fn matches_are_none_when_tracking_is_off() {
        let document = doc! { "age": 40 };
        let spec = SearchSpec::new().field("age", Cond::gt(1));

        let mut scorer = RelevancyScorer::new(&document, false);
        scorer.score(&spec).unwrap();
        assert!(scorer.into_matches().is_none());
    }

    #[test]
    fn malformed_regex_aborts_scoring() {
        let spec = SearchSpec::new()
            .field("age", Cond::gte(30))
            .field("name", Cond::regex("("));
        let document = doc! { "age": 40, "name": "Bob" };

        assert!(score_document(&spec, &document).is_err());
    }

    #[test]
    fn end_to_end_scenario_scores() {
        let spec = SearchSpec::new()
            .field("age", Cond::gte(30))
            .any_of(vec![SearchSpec::new().field("name", Cond::eq("Bob"))]);

        let ann = doc! { "age": 25, "name": "Ann" };
        let bob = doc! { "age": 40, "name": "Bob" };
        let cid = doc! { "age": 40, "name": "Cid" };

        assert_eq!(score_document(&spec, &ann).unwrap(), 0);
        assert_eq!(score_document(&spec, &bob).unwrap(), 2);
        assert_eq!(score_document(&spec, &cid).unwrap(), 1);
    }
}
