//! Email notification trait and the log-backed implementation.
//!
//! SMTP delivery is an external collaborator; the core only depends on this
//! trait. Delivery failure is a degraded side channel, never an error
//! surfaced to the caller — call sites log a warning and move on.

use async_trait::async_trait;
use tracing::info;

use ampflux_core::result::AppResult;

/// Sends notification emails.
#[async_trait]
pub trait EmailNotifier: Send + Sync + std::fmt::Debug {
    /// Notify an invitee that a project was shared with them.
    async fn send_share_invitation(
        &self,
        invitee_email: &str,
        project_name: &str,
        inviter_name: &str,
        role: &str,
    ) -> AppResult<()>;

    /// Send a company invite to an email address.
    async fn send_company_invite(&self, invitee_email: &str, company_name: &str) -> AppResult<()>;
}

/// Notifier that writes a structured log line instead of delivering mail.
///
/// Stands in for the SMTP integration in development and tests.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl LogMailer {
    /// Creates a new log-backed mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailNotifier for LogMailer {
    async fn send_share_invitation(
        &self,
        invitee_email: &str,
        project_name: &str,
        inviter_name: &str,
        role: &str,
    ) -> AppResult<()> {
        info!(
            to = invitee_email,
            project = project_name,
            inviter = inviter_name,
            role,
            "Share invitation email"
        );
        Ok(())
    }

    async fn send_company_invite(&self, invitee_email: &str, company_name: &str) -> AppResult<()> {
        info!(to = invitee_email, company = company_name, "Company invite email");
        Ok(())
    }
}
