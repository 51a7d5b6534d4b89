//! Domain entities for AmpFlux.
//!
//! Plain data structs mapped to the relational schema via `sqlx::FromRow`,
//! with enums mirrored as PostgreSQL enum types.

pub mod account;
pub mod audit;
pub mod circuit;
pub mod company;
pub mod job;
pub mod project;
pub mod share;
pub mod simulation;
