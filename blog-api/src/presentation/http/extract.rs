use axum::extract::FromRequest;

use super::app_error::AppError;

/// `axum::Json` whose rejections render through [`AppError`] as 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct ApiJson<T>(pub(crate) T);
