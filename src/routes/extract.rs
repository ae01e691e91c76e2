//! Extractors whose rejections render through [`AppError`], so malformed
//! requests get the same `{"error": ..}` body as every other failure.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{error::AppError, services::collections::COLLECTION_NOT_FOUND};

/// JSON body; syntax, type and content-type errors become 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string; malformed parameters become 400
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// The `{collection_uuid}` path segment.
///
/// A segment that is not a UUID cannot name any collection, so it is
/// reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct CollectionUuid(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CollectionUuid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(uuid) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Unparseable collection uuid");
                AppError::NotFound(COLLECTION_NOT_FOUND.to_string())
            })?;

        Ok(Self(uuid))
    }
}
