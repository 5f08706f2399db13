//! Re-exports of the HTTP layer types used across the workspace, so that
//! sub-crates depend on `remo-core` rather than on axum directly.

pub use axum::body::{to_bytes, Body};
pub use axum::extract::{RawPathParams, Request};
pub use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
pub use axum::response::{Html, IntoResponse, Response};
pub use axum::routing::{self, MethodFilter, MethodRouter};
pub use axum::{serve, Json, Router};
pub use bytes::Bytes;
