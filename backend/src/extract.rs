//! Request extractors whose rejections render as `AppError`

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json<T>` that reports malformed bodies as a JSON validation error
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
