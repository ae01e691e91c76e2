use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{Collection, Movie, NewCollection},
    services::{
        genres::{top_genres, FAVORITE_GENRE_COUNT},
        ingestion::{ingest, IngestReport},
    },
};

pub const COLLECTION_NOT_FOUND: &str = "Collection not found";
pub const MOVIES_REQUIRED: &str = "Movies data is required";

/// Everything a user owns, plus their favorite genres
#[derive(Debug, Clone)]
pub struct CollectionOverview {
    pub collections: Vec<Collection>,
    pub favorite_genres: String,
}

#[derive(Debug, Clone)]
pub struct CollectionDetail {
    pub collection: Collection,
    pub movies: Vec<Movie>,
}

/// Partial update of a collection.
///
/// `movies: Some(vec![])` clears the collection; `None` leaves movies alone.
#[derive(Debug, Clone, Default)]
pub struct CollectionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub movies: Option<Vec<Value>>,
}

/// Owner-scoped collection operations.
///
/// A collection that exists but belongs to someone else is reported exactly
/// like one that does not exist.
#[derive(Clone)]
pub struct CollectionManager {
    store: Arc<dyn Store>,
}

impl CollectionManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn find_owned(&self, uuid: Uuid, owner_id: i64) -> AppResult<Collection> {
        self.store
            .find_collection(uuid, owner_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(collection = %uuid, owner = owner_id, "Collection not found for user");
                AppError::NotFound(COLLECTION_NOT_FOUND.to_string())
            })
    }

    pub async fn list(&self, owner_id: i64) -> AppResult<CollectionOverview> {
        let collections = self.store.list_collections(owner_id).await?;
        let movies = self.store.list_movies_for_owner(owner_id).await?;

        Ok(CollectionOverview {
            collections,
            favorite_genres: top_genres(&movies, FAVORITE_GENRE_COUNT),
        })
    }

    pub async fn get(&self, uuid: Uuid, owner_id: i64) -> AppResult<CollectionDetail> {
        let collection = self.find_owned(uuid, owner_id).await?;
        let movies = self.store.list_movies(collection.id).await?;

        Ok(CollectionDetail { collection, movies })
    }

    /// Creates a collection and ingests its movies, returning the new uuid.
    ///
    /// Input is validated before anything is written. Creation and ingestion
    /// are separate writes: a failure in between leaves an empty collection.
    pub async fn create(
        &self,
        owner_id: i64,
        title: Option<String>,
        description: Option<String>,
        movies: Option<Vec<Value>>,
    ) -> AppResult<Uuid> {
        let title = title.ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))?;
        let description = description
            .ok_or_else(|| AppError::InvalidInput("Description is required".to_string()))?;
        let movies = require_movies(movies)?;

        let collection = self
            .store
            .create_collection(NewCollection::new(title, description, owner_id))
            .await?;

        tracing::info!(collection = %collection.uuid, owner = owner_id, "Collection created");

        ingest(self.store.as_ref(), &collection, &movies).await;

        Ok(collection.uuid)
    }

    /// Ingests more movies into an existing collection
    pub async fn add_movies(
        &self,
        uuid: Uuid,
        owner_id: i64,
        movies: Option<Vec<Value>>,
    ) -> AppResult<IngestReport> {
        let collection = self.find_owned(uuid, owner_id).await?;
        let movies = require_movies(movies)?;

        Ok(ingest(self.store.as_ref(), &collection, &movies).await)
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        owner_id: i64,
        update: CollectionUpdate,
    ) -> AppResult<Uuid> {
        let mut collection = self.find_owned(uuid, owner_id).await?;

        if let Some(title) = provided(update.title) {
            collection.title = title;
        }
        if let Some(description) = provided(update.description) {
            collection.description = description;
        }

        if let Some(movies) = update.movies {
            let removed = self.store.delete_movies(collection.id).await?;
            tracing::info!(collection = %collection.uuid, removed, "Replacing collection movies");
            ingest(self.store.as_ref(), &collection, &movies).await;
        }

        self.store.update_collection(&collection).await?;

        Ok(collection.uuid)
    }

    pub async fn delete(&self, uuid: Uuid, owner_id: i64) -> AppResult<()> {
        let collection = self.find_owned(uuid, owner_id).await?;
        self.store.delete_collection(collection.id).await?;

        tracing::info!(collection = %uuid, owner = owner_id, "Collection deleted");
        Ok(())
    }
}

fn require_movies(movies: Option<Vec<Value>>) -> AppResult<Vec<Value>> {
    match movies {
        Some(movies) if !movies.is_empty() => Ok(movies),
        _ => Err(AppError::InvalidInput(MOVIES_REQUIRED.to_string())),
    }
}

/// An empty string counts as "not provided", so a field cannot be cleared
/// through an update.
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
