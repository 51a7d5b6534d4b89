//! Simulation result records.

pub mod model;

pub use model::Simulation;
