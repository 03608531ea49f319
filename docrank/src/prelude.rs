//! Convenient re-exports of commonly used types from docrank.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docrank::prelude::*;
//! ```

pub use docrank_core::{
    error::{SearchError, SearchResult},
    rank::rank,
    score::{RelevancyScorer, ScoredDocument, score_document},
    search::{SearchOptions, Searcher},
    source::{CandidateSource, Sort, SortDirection},
    spec::{Clause, Cond, SearchSpec, SpecEntry},
};
