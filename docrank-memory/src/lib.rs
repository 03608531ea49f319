//! In-memory candidate source for docrank.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `CandidateSource` trait. It uses async-aware read-write locks for
//! concurrent access and is ideal for development and tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use docrank::{prelude::*, memory::InMemorySource};
//! use bson::{Uuid, Bson, doc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = InMemorySource::new();
//!
//!     source
//!         .insert_documents(
//!             vec![(Uuid::new(), Bson::Document(doc! { "name": "Alice", "age": 30 }))],
//!             "users",
//!         )
//!         .await?;
//!
//!     let searcher = Searcher::new(source);
//!     let spec = SearchSpec::new().field("age", Cond::gte(30));
//!     let ranked = searcher.search("users", &spec, SearchOptions::new()).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrank_memory;

pub mod store;

pub use store::{InMemorySource, InMemorySourceBuilder};
