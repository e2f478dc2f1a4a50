//! Extractors whose rejections render through `AppError`, so malformed bodies and
//! path parameters get the same envelope as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::api::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
