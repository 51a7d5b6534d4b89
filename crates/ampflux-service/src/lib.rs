//! Business services for AmpFlux.
//!
//! Each service orchestrates repositories, the access resolver, the audit
//! trail, and (for simulations) the task gateway. Services own authorization
//! decisions; HTTP handlers only translate between DTOs and service calls.

pub mod audit;
pub mod circuit;
pub mod notify;
pub mod project;
pub mod share;
pub mod simulation;
