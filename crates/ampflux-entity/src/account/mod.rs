//! Account entity and role.

pub mod model;
pub mod role;

pub use model::{Account, CreateAccount};
pub use role::AccountRole;
