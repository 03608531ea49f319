//! Ordering of scored documents by descending relevancy.

use crate::score::ScoredDocument;

/// Sorts a batch of scored documents by descending relevancy, in place.
///
/// The sort is stable and uses no secondary key, so equal-score documents
/// keep their input order. Candidate order is therefore reproducible given a
/// fixed candidate batch.
pub fn rank(results: &mut [ScoredDocument]) {
    results.sort_by(|a, b| b.relevancy.cmp(&a.relevancy));
}
