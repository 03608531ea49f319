//! Candidate retrieval abstraction for relevancy search.
//!
//! Ranking operates on a batch of already-fetched documents; this module
//! defines the seam through which that batch is obtained. Storage concerns
//! (connections, wire protocols, decoding) live entirely behind
//! [`CandidateSource`] implementations.

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::error::SearchResult;

/// Sort direction for candidate retrieval.
#[derive(Debug, Clone)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// Sort specification applied when fetching candidates.
///
/// Sorting shapes which documents enter the candidate batch (together with a
/// limit), not the relevancy computation itself — ranked output is always
/// ordered by relevancy.
#[derive(Debug, Clone)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Creates a sort specification.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }
}

/// Abstract interface for fetching candidate documents.
///
/// Implementers own the storage wire protocol and document decoding; the
/// search orchestrator only consumes the decoded batch. Implementations must
/// be safe for concurrent reads, since multiple searches may run against the
/// same source at once.
#[async_trait]
pub trait CandidateSource: Send + Sync + Debug {
    /// Fetches the candidate batch for one collection.
    ///
    /// `sort` and `limit` are applied at the source: they decide which and
    /// how many documents are returned, nothing more. A collection unknown to
    /// the source yields an empty batch.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`](crate::error::SearchError) if retrieval
    /// fails.
    async fn fetch(
        &self,
        collection: &str,
        sort: Option<&Sort>,
        limit: Option<usize>,
    ) -> SearchResult<Vec<Bson>>;
}

#[async_trait]
impl<S> CandidateSource for &S
where
    S: CandidateSource,
{
    async fn fetch(
        &self,
        collection: &str,
        sort: Option<&Sort>,
        limit: Option<usize>,
    ) -> SearchResult<Vec<Bson>> {
        (*self)
            .fetch(collection, sort, limit)
            .await
    }
}
