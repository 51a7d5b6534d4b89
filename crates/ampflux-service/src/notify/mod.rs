//! Outbound email side channel.

pub mod mailer;

pub use mailer::{EmailNotifier, LogMailer};
