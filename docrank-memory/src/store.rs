//! In-memory candidate source implementation.
//!
//! Stores BSON documents per collection behind an async-aware read-write
//! lock. Intended for development and tests; a production deployment would
//! put a real document store behind the [`CandidateSource`] seam instead.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Uuid};
use mea::rwlock::RwLock;

use docrank_core::{
    error::{SearchError, SearchResult},
    evaluate::Comparable,
    source::{CandidateSource, Sort, SortDirection},
};

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory candidate source.
///
/// Documents are stored as BSON values indexed by their UUID, grouped by
/// collection name. The source is cloneable and uses an `Arc`-wrapped
/// internal state, so clones share the same underlying data and it can be
/// handed to concurrent searches safely.
///
/// Fetching without a sort returns documents in unspecified order; pass a
/// [`Sort`] when candidate order matters (e.g. together with a limit).
///
/// # Example
///
/// ```ignore
/// use docrank::memory::InMemorySource;
/// use bson::{Uuid, Bson, doc};
///
/// let source = InMemorySource::new();
/// let id = Uuid::new();
/// let doc = Bson::Document(doc! { "name": "Alice", "age": 30 });
/// source.insert_documents(vec![(id, doc)], "users").await?;
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemorySource {
    /// The main storage map: collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemorySource {
    /// Creates a new empty in-memory candidate source.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemorySource`.
    pub fn builder() -> InMemorySourceBuilder {
        InMemorySourceBuilder::default()
    }

    /// Inserts documents into a collection, creating the collection on
    /// demand.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DocumentAlreadyExists`] if a document with the
    /// same ID is already present.
    pub async fn insert_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> SearchResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        for (id, doc) in documents {
            let key = id.to_string();

            if collection_map.contains_key(&key) {
                return Err(SearchError::DocumentAlreadyExists(key, collection.to_string()));
            }

            collection_map.insert(key, doc);
        }

        Ok(())
    }

    /// Deletes documents from a collection by their IDs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::CollectionNotFound`] if the collection does not
    /// exist, or [`SearchError::DocumentNotFound`] for a missing ID.
    pub async fn delete_documents(&self, ids: Vec<Uuid>, collection: &str) -> SearchResult<()> {
        let mut store = self.store.write().await;
        let collection_map = match store.get_mut(collection) {
            Some(col) => col,
            None => return Err(SearchError::CollectionNotFound(collection.to_string())),
        };

        for id in ids {
            let key = id.to_string();

            if collection_map.remove(&key).is_none() {
                return Err(SearchError::DocumentNotFound(key, collection.to_string()));
            }
        }

        Ok(())
    }

    /// Lists the names of all collections in the source.
    pub async fn list_collections(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CandidateSource for InMemorySource {
    async fn fetch(
        &self,
        collection: &str,
        sort: Option<&Sort>,
        limit: Option<usize>,
    ) -> SearchResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let mut documents = collection_map
            .values()
            .cloned()
            .collect::<Vec<_>>();

        if let Some(sort) = sort {
            documents.sort_by(|a, b| {
                // Missing fields and non-document values sort as Null.
                let left = a
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);
                let right = b
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);

                match sort.direction {
                    SortDirection::Asc => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
                    SortDirection::Desc => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
                }
            });
        }

        if let Some(limit) = limit {
            documents.truncate(limit);
        }

        Ok(documents)
    }
}

/// Builder for constructing [`InMemorySource`] instances.
///
/// Currently a no-op builder; it exists so call sites match other source
/// implementations that need configuration.
#[derive(Default)]
pub struct InMemorySourceBuilder;

impl InMemorySourceBuilder {
    /// Builds and returns a new [`InMemorySource`] instance.
    pub fn build(self) -> InMemorySource {
        InMemorySource::new()
    }
}
