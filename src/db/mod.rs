pub mod memory;
pub mod postgres;
pub mod redis;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Collection, Movie, NewCollection, NewMovie, User},
};

pub use memory::MemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use self::redis::{create_redis_client, RedisCounter};

/// Persistence contract for users, collections and movies.
///
/// Every method is a single-row (or single-statement) operation. Callers
/// compose them without a surrounding transaction.
///
/// Writes that hit a uniqueness constraint (username, collection uuid, movie
/// uuid) fail with [`AppError::Conflict`](crate::error::AppError::Conflict).
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn create_collection(&self, draft: NewCollection) -> AppResult<Collection>;

    /// Looks up a collection by external id, scoped to its owner
    async fn find_collection(&self, uuid: Uuid, owner_id: i64) -> AppResult<Option<Collection>>;

    /// Returns the owner's collections in creation order
    async fn list_collections(&self, owner_id: i64) -> AppResult<Vec<Collection>>;

    /// Persists title and description of an existing collection.
    /// Fails with `NotFound` when the row is gone.
    async fn update_collection(&self, collection: &Collection) -> AppResult<()>;

    /// Deletes a collection together with all of its movies
    async fn delete_collection(&self, id: i64) -> AppResult<()>;

    /// Looks up a movie by external id across every collection
    async fn find_movie(&self, uuid: Uuid) -> AppResult<Option<Movie>>;

    async fn insert_movie(&self, collection_id: i64, movie: &NewMovie) -> AppResult<Movie>;

    /// Returns a collection's movies in insertion order
    async fn list_movies(&self, collection_id: i64) -> AppResult<Vec<Movie>>;

    /// Returns every movie the owner has, grouped by collection in creation
    /// order and by insertion order within a collection
    async fn list_movies_for_owner(&self, owner_id: i64) -> AppResult<Vec<Movie>>;

    /// Deletes all movies of a collection, returning how many were removed
    async fn delete_movies(&self, collection_id: i64) -> AppResult<u64>;
}
