/**
 * Request Extractors
 *
 * Wrappers over axum's `Json`, `Path` and `Query` whose rejection is
 * `ApiError`. A body or parameter that fails to parse is answered with the
 * usual `{"error", "status"}` JSON and a 400, never axum's plain-text
 * rejection.
 *
 * Responses still use `axum::Json`; these are for input only.
 */

use axum::extract::{FromRequest, FromRequestParts};

use crate::backend::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Typed path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Typed query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
