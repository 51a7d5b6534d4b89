//! Circuit version history.

pub mod service;

pub use service::CircuitService;
