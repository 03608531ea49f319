//! Search orchestration: fetch, score, rank.
//!
//! The [`Searcher`] connects a [`CandidateSource`] to the relevancy scorer
//! and ranking sorter. It is stateless beyond the source handle and safe to
//! share across concurrent callers, provided the source itself supports
//! concurrent reads.

use tracing::debug;

use crate::{
    error::{SearchError, SearchResult},
    rank::rank,
    score::{RelevancyScorer, ScoredDocument},
    source::{CandidateSource, Sort, SortDirection},
    spec::SearchSpec,
};

/// Options shaping one search call.
///
/// Sort and limit are forwarded to the candidate source and affect which and
/// how many documents are fetched; they never enter the relevancy
/// computation. `with_matches` requests per-document matched-field tracking.
///
/// # Example
///
/// ```ignore
/// use docrank::search::SearchOptions;
/// use docrank::source::SortDirection;
///
/// let options = SearchOptions::new()
///     .sort("created_at", SortDirection::Desc)
///     .limit(50)
///     .with_matches();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Sort applied at the candidate source.
    pub sort: Option<Sort>,
    /// Maximum number of candidates fetched from the source.
    pub limit: Option<usize>,
    /// Whether each result should carry the list of matched field names.
    pub with_matches: bool,
}

impl SearchOptions {
    /// Creates empty options: unsorted, unlimited, no match tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort applied when fetching candidates.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort::new(field, direction));
        self
    }

    /// Sets the maximum number of candidates fetched.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Requests matched-field tracking on each result.
    pub fn with_matches(mut self) -> Self {
        self.with_matches = true;
        self
    }
}

/// Relevancy search over a candidate source.
///
/// Each call fetches a candidate batch, attaches a relevancy score to every
/// document, and returns the batch ordered by descending relevancy. Scoring is
/// pure and deterministic: repeating a search with an identical spec over an
/// unchanged candidate set returns identical scores.
#[derive(Debug)]
pub struct Searcher<S: CandidateSource> {
    source: S,
}

impl<S: CandidateSource> Searcher<S> {
    /// Creates a searcher over the given candidate source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying candidate source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs a relevancy search against one collection.
    ///
    /// Candidates are fetched with the options' sort/limit applied at the
    /// source, scored one by one against `spec`, and ranked by descending
    /// relevancy (stable on ties). When `with_matches` is set, each result
    /// carries the matched field names.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PatternCompilation`] if a `$regex` clause fails
    /// to compile (the whole call aborts; no partial results),
    /// [`SearchError::InvalidDocument`] if the source yields a non-document
    /// BSON value, or any error raised by the source during retrieval.
    pub async fn search(
        &self,
        collection: &str,
        spec: &SearchSpec,
        options: SearchOptions,
    ) -> SearchResult<Vec<ScoredDocument>> {
        let candidates = self
            .source
            .fetch(collection, options.sort.as_ref(), options.limit)
            .await?;

        debug!(
            collection,
            candidates = candidates.len(),
            clauses = spec.entries().len(),
            with_matches = options.with_matches,
            "scoring candidate batch"
        );

        let mut results = Vec::with_capacity(candidates.len());

        for document in candidates {
            let (relevancy, matches) = {
                let doc = document
                    .as_document()
                    .ok_or_else(|| SearchError::InvalidDocument(format!(
                        "candidate in collection {collection} is not a document"
                    )))?;

                let mut scorer = RelevancyScorer::new(doc, options.with_matches);
                let relevancy = scorer.score(spec)?;

                (relevancy, scorer.into_matches())
            };

            results.push(ScoredDocument { document, relevancy, matches });
        }

        rank(&mut results);

        Ok(results)
    }
}
