//! HTTP API layer for AmpFlux.
//!
//! Axum router, shared application state, the cookie-based session
//! extractor, middleware, DTOs, and the `AppError` → response mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
