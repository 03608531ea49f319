//! Main docrank crate providing relevance-ranked search over document stores.
//!
//! This crate is the primary entry point for users of the docrank framework.
//! It re-exports the core types and functionality from the sub-crates and
//! provides convenient access to candidate source implementations.
//!
//! # Features
//!
//! - **Relevancy ranking** - Score already-fetched documents by counting
//!   matched clauses and return them ordered by descending score
//! - **Store-mirrored query language** - The spec reuses the store's own
//!   filter shapes (`$or`, `$gt`/`$lt`/`$gte`/`$lte`, `$in`, `$regex`), so
//!   the same literal query works for ranking and for native lookups
//! - **Matched-field tracking** - Optionally report which fields matched on
//!   each result
//! - **Pluggable candidate sources** - Async trait seam to whatever owns
//!   document retrieval
//!
//! # Quick Start
//!
//! ```ignore
//! use docrank::{prelude::*, memory::InMemorySource};
//! use bson::{Uuid, Bson, doc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = InMemorySource::new();
//!
//!     source
//!         .insert_documents(
//!             vec![
//!                 (Uuid::new(), Bson::Document(doc! { "name": "Ann", "age": 25 })),
//!                 (Uuid::new(), Bson::Document(doc! { "name": "Bob", "age": 40 })),
//!             ],
//!             "users",
//!         )
//!         .await
//!         .unwrap();
//!
//!     let searcher = Searcher::new(source);
//!
//!     // The same spec shape the store's native filter mechanism takes.
//!     let spec = SearchSpec::from_filter_document(&doc! {
//!         "age": { "$gte": 30 },
//!         "$or": [ { "name": "Bob" } ],
//!     })
//!     .unwrap();
//!
//!     let ranked = searcher
//!         .search("users", &spec, SearchOptions::new().with_matches())
//!         .await
//!         .unwrap();
//!
//!     for result in ranked {
//!         println!("{}: {:?}", result.relevancy, result.matches);
//!     }
//! }
//! ```

pub mod prelude;

pub use docrank_core::{error, evaluate, rank, score, search, source, spec};

// Re-export BSON types for convenience
pub use bson;

/// In-memory candidate source implementations.
pub mod memory {
    pub use docrank_memory::{InMemorySource, InMemorySourceBuilder};
}
