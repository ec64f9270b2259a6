//! Extractors whose rejections render as [`ApiError`] JSON bodies instead of axum's plain text.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use super::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
