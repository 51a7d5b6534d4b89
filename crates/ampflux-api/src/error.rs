//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` impl lives in `ampflux-core` (which owns
//! `AppError`) to satisfy the orphan rule; this module re-exports the response
//! body type for API consumers.

pub use ampflux_core::error::ApiErrorResponse;
