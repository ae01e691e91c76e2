use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    routes::{AppQuery, AppState},
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Handler proxying one page of the upstream movie catalog
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageQuery>,
) -> AppResult<Json<Value>> {
    let credentials = state.credentials.resolve().ok_or_else(|| {
        tracing::error!("Movie API credentials are not configured");
        AppError::ConfigurationMissing("Movie API credentials are missing".to_string())
    })?;

    let page = params.page.unwrap_or(1);
    let data = state.catalog.fetch_page(page, &credentials).await?;

    Ok(Json(data))
}
