use std::collections::BTreeMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{Collection, Movie, NewCollection, NewMovie, User},
};

/// Inner tables, keyed by sequence id so iteration follows insertion order
#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    collections: BTreeMap<i64, Collection>,
    movies: BTreeMap<i64, Movie>,
    last_user_id: i64,
    last_collection_id: i64,
    last_movie_id: i64,
}

/// [`Store`] kept in process memory.
///
/// Mirrors the PostgreSQL schema constraints: unique usernames and uuids,
/// cascading deletes from collections to movies.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let mut tables = self.inner.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(AppError::Conflict("user already exists".to_string()));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn create_collection(&self, draft: NewCollection) -> AppResult<Collection> {
        let mut tables = self.inner.write().await;
        if tables.collections.values().any(|c| c.uuid == draft.uuid) {
            return Err(AppError::Conflict("collection already exists".to_string()));
        }

        tables.last_collection_id += 1;
        let collection = Collection {
            id: tables.last_collection_id,
            uuid: draft.uuid,
            title: draft.title,
            description: draft.description,
            owner_id: draft.owner_id,
        };
        tables.collections.insert(collection.id, collection.clone());

        Ok(collection)
    }

    async fn find_collection(&self, uuid: Uuid, owner_id: i64) -> AppResult<Option<Collection>> {
        let tables = self.inner.read().await;
        Ok(tables
            .collections
            .values()
            .find(|c| c.uuid == uuid && c.owner_id == owner_id)
            .cloned())
    }

    async fn list_collections(&self, owner_id: i64) -> AppResult<Vec<Collection>> {
        let tables = self.inner.read().await;
        Ok(tables
            .collections
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_collection(&self, collection: &Collection) -> AppResult<()> {
        let mut tables = self.inner.write().await;
        let existing = tables
            .collections
            .get_mut(&collection.id)
            .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;
        existing.title = collection.title.clone();
        existing.description = collection.description.clone();

        Ok(())
    }

    async fn delete_collection(&self, id: i64) -> AppResult<()> {
        let mut tables = self.inner.write().await;
        tables.collections.remove(&id);
        tables.movies.retain(|_, m| m.collection_id != id);

        Ok(())
    }

    async fn find_movie(&self, uuid: Uuid) -> AppResult<Option<Movie>> {
        let tables = self.inner.read().await;
        Ok(tables.movies.values().find(|m| m.uuid == uuid).cloned())
    }

    async fn insert_movie(&self, collection_id: i64, movie: &NewMovie) -> AppResult<Movie> {
        let mut tables = self.inner.write().await;
        if tables.movies.values().any(|m| m.uuid == movie.uuid) {
            return Err(AppError::Conflict("movie already exists".to_string()));
        }
        if !tables.collections.contains_key(&collection_id) {
            return Err(AppError::NotFound(format!(
                "collection {} does not exist",
                collection_id
            )));
        }

        tables.last_movie_id += 1;
        let stored = Movie {
            id: tables.last_movie_id,
            uuid: movie.uuid,
            title: movie.title.clone(),
            description: movie.description.clone(),
            genres: movie.genres.clone(),
            collection_id,
        };
        tables.movies.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn list_movies(&self, collection_id: i64) -> AppResult<Vec<Movie>> {
        let tables = self.inner.read().await;
        Ok(tables
            .movies
            .values()
            .filter(|m| m.collection_id == collection_id)
            .cloned()
            .collect())
    }

    async fn list_movies_for_owner(&self, owner_id: i64) -> AppResult<Vec<Movie>> {
        let tables = self.inner.read().await;
        let mut movies = Vec::new();
        for collection in tables.collections.values().filter(|c| c.owner_id == owner_id) {
            movies.extend(
                tables
                    .movies
                    .values()
                    .filter(|m| m.collection_id == collection.id)
                    .cloned(),
            );
        }

        Ok(movies)
    }

    async fn delete_movies(&self, collection_id: i64) -> AppResult<u64> {
        let mut tables = self.inner.write().await;
        let before = tables.movies.len();
        tables.movies.retain(|_, m| m.collection_id != collection_id);

        Ok((before - tables.movies.len()) as u64)
    }
}
