//! HTTP handler for government schemes

use axum::{
    extract::Query,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::schemes::{parse_language, schemes_for, SCHEMES_CACHE_CONTROL};

#[derive(Debug, Deserialize)]
pub struct SchemesQuery {
    pub language: Option<String>,
}

/// GET /api/schemes?language=en|hi|bn
pub async fn list_schemes(Query(query): Query<SchemesQuery>) -> AppResult<impl IntoResponse> {
    let language = parse_language(query.language.as_deref())?;
    Ok((
        [(header::CACHE_CONTROL, SCHEMES_CACHE_CONTROL)],
        Json(schemes_for(language)),
    ))
}
