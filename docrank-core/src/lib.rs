//! Heuristic relevance-ranking search over document result sets.
//!
//! Document stores answer equality/range filters with an unranked result set;
//! this crate layers a relevancy score on top, counting matched clauses per
//! document and ordering the batch by descending score. It provides:
//!
//! - **Search specification model** ([`spec`]) - Tagged clause union mirroring
//!   the store's filter syntax (`$or`, `$gt`/`$lt`/`$gte`/`$lte`, `$in`,
//!   `$regex`), with literal filter-document interop
//! - **Predicate evaluator** ([`evaluate`]) - Binary clause-vs-field match
//!   tests with loose value comparison
//! - **Relevancy scorer** ([`score`]) - Additive clause counting with optional
//!   matched-field tracking
//! - **Ranking sorter** ([`rank`]) - Stable descending-relevancy ordering
//! - **Search orchestration** ([`search`]) - Fetch, score, rank over a
//!   candidate source
//! - **Candidate source abstraction** ([`source`]) - Async seam to the storage
//!   collaborator owning retrieval
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use docrank_core::{search::{Searcher, SearchOptions}, spec::{SearchSpec, Cond}};
//!
//! let searcher = Searcher::new(source);
//!
//! let spec = SearchSpec::new()
//!     .field("age", Cond::gte(30))
//!     .any_of(vec![SearchSpec::new().field("name", Cond::eq("Bob"))]);
//!
//! let ranked = searcher
//!     .search("users", &spec, SearchOptions::new().with_matches())
//!     .await?;
//!
//! for result in ranked {
//!     println!("{} -> {:?}", result.relevancy, result.matches);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrank_core;

pub mod error;
pub mod evaluate;
pub mod rank;
pub mod score;
pub mod search;
pub mod source;
pub mod spec;
