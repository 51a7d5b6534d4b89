//! Core building blocks shared by every AmpFlux crate.
//!
//! Holds the configuration schemas, the unified [`error::AppError`] type,
//! and the [`result::AppResult`] alias.

pub mod config;
pub mod error;
pub mod result;
