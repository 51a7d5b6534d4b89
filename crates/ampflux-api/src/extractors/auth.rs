//! `CurrentAccount` extractor — the per-request session middleware.
//!
//! Pulls the access token from its cookie, verifies it (revocation first,
//! then signature/expiry, then kind), and loads the account. Every failure
//! collapses to the same opaque 401; public routes simply do not use this
//! extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use ampflux_core::error::AppError;
use ampflux_entity::account::Account;

use ampflux_auth::session::AUTH_FAILED;

use crate::cookies::ACCESS_COOKIE;
use crate::state::AppState;

/// The authenticated account attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl std::ops::Deref for CurrentAccount {
    type Target = Account;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(ACCESS_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::unauthorized(AUTH_FAILED))?;

        let account = state.session_manager.authenticate(&token).await?;
        Ok(CurrentAccount(account))
    }
}
