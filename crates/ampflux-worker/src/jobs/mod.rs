//! Job handler implementations.

pub mod simulation;
