use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{Collection, Movie, NewCollection, NewMovie, User},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Turns unique-index violations into [`AppError::Conflict`]
fn map_write_error(error: sqlx::Error, what: &str) -> AppError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            AppError::Conflict(format!("{} already exists", what))
        }
        _ => AppError::Database(error),
    }
}

/// [`Store`] backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "user"))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_collection(&self, draft: NewCollection) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (uuid, title, description, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, uuid, title, description, owner_id
            "#,
        )
        .bind(draft.uuid)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "collection"))
    }

    async fn find_collection(&self, uuid: Uuid, owner_id: i64) -> AppResult<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, uuid, title, description, owner_id
            FROM collections
            WHERE uuid = $1 AND owner_id = $2
            "#,
        )
        .bind(uuid)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    async fn list_collections(&self, owner_id: i64) -> AppResult<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, uuid, title, description, owner_id
            FROM collections
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    async fn update_collection(&self, collection: &Collection) -> AppResult<()> {
        let result = sqlx::query("UPDATE collections SET title = $2, description = $3 WHERE id = $1")
            .bind(collection.id)
            .bind(&collection.title)
            .bind(&collection.description)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Collection not found".to_string()));
        }

        Ok(())
    }

    async fn delete_collection(&self, id: i64) -> AppResult<()> {
        // movies go with it via ON DELETE CASCADE
        sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_movie(&self, uuid: Uuid) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, uuid, title, description, genres, collection_id
            FROM movies
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn insert_movie(&self, collection_id: i64, movie: &NewMovie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (uuid, title, description, genres, collection_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, uuid, title, description, genres, collection_id
            "#,
        )
        .bind(movie.uuid)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(&movie.genres)
        .bind(collection_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "movie"))
    }

    async fn list_movies(&self, collection_id: i64) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, uuid, title, description, genres, collection_id
            FROM movies
            WHERE collection_id = $1
            ORDER BY id
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn list_movies_for_owner(&self, owner_id: i64) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.uuid, m.title, m.description, m.genres, m.collection_id
            FROM movies m
            JOIN collections c ON c.id = m.collection_id
            WHERE c.owner_id = $1
            ORDER BY c.id, m.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn delete_movies(&self, collection_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE collection_id = $1")
            .bind(collection_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
