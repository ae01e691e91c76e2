use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::AuthUser,
    models::{Collection, Movie},
    routes::{AppJson, AppState, CollectionUuid},
    services::CollectionUpdate,
};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateCollectionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub movies: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct AddMoviesRequest {
    pub movies: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCollectionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub movies: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub title: String,
    pub uuid: Uuid,
    pub description: String,
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        Self {
            title: collection.title.clone(),
            uuid: collection.uuid,
            description: collection.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionListData {
    pub collection: Vec<CollectionSummary>,
    pub favorite_genres: String,
}

#[derive(Debug, Serialize)]
pub struct CollectionListResponse {
    pub is_success: bool,
    pub data: CollectionListData,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub title: String,
    pub description: String,
    pub genres: Option<String>,
    pub uuid: Uuid,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            title: movie.title,
            description: movie.description,
            genres: movie.genres,
            uuid: movie.uuid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionDetailResponse {
    pub title: String,
    pub description: String,
    pub movies: Vec<MovieResponse>,
}

#[derive(Debug, Serialize)]
pub struct CollectionCreatedResponse {
    pub collection_uuid: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CollectionUpdatedResponse {
    pub collection_uuid: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// Handlers

/// List the caller's collections with their favorite genres
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<CollectionListResponse>> {
    let overview = state.collections().list(user.id).await?;

    Ok(Json(CollectionListResponse {
        is_success: true,
        data: CollectionListData {
            collection: overview
                .collections
                .iter()
                .map(CollectionSummary::from)
                .collect(),
            favorite_genres: overview.favorite_genres,
        },
    }))
}

/// Get one collection with its movies
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    CollectionUuid(collection_uuid): CollectionUuid,
) -> AppResult<Json<CollectionDetailResponse>> {
    let detail = state.collections().get(collection_uuid, user.id).await?;

    Ok(Json(CollectionDetailResponse {
        title: detail.collection.title,
        description: detail.collection.description,
        movies: detail.movies.into_iter().map(MovieResponse::from).collect(),
    }))
}

/// Create a collection with an initial movie list
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(request): AppJson<CreateCollectionRequest>,
) -> AppResult<(StatusCode, Json<CollectionCreatedResponse>)> {
    let collection_uuid = state
        .collections()
        .create(user.id, request.title, request.description, request.movies)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CollectionCreatedResponse { collection_uuid }),
    ))
}

/// Add movies to an existing collection; duplicates are skipped silently
pub async fn add_movies(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    CollectionUuid(collection_uuid): CollectionUuid,
    AppJson(request): AppJson<AddMoviesRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .collections()
        .add_movies(collection_uuid, user.id, request.movies)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "New movies added".to_string(),
        }),
    ))
}

/// Update title, description and optionally replace the movie set
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    CollectionUuid(collection_uuid): CollectionUuid,
    AppJson(request): AppJson<UpdateCollectionRequest>,
) -> AppResult<Json<CollectionUpdatedResponse>> {
    let update = CollectionUpdate {
        title: request.title,
        description: request.description,
        movies: request.movies,
    };
    let collection_uuid = state
        .collections()
        .update(collection_uuid, user.id, update)
        .await?;

    Ok(Json(CollectionUpdatedResponse {
        collection_uuid,
        message: "Collection updated successfully".to_string(),
    }))
}

/// Delete a collection and its movies
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    CollectionUuid(collection_uuid): CollectionUuid,
) -> AppResult<StatusCode> {
    state.collections().delete(collection_uuid, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update or delete without an identifier
pub async fn missing_uuid() -> AppError {
    AppError::InvalidInput("Please provide the collection uuid".to_string())
}
