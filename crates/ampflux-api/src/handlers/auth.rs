//! Auth handlers — register, login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use ampflux_auth::session::{AUTH_FAILED, RegisterParams};
use ampflux_core::error::AppError;

use crate::cookies::{self, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{AuthResponse, MessageResponse, RefreshResponse};
use crate::dto::validate_payload;
use crate::state::AppState;

/// POST /auth/register — creates the account and its company, then logs in.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    validate_payload(&req)?;

    let (account, tokens) = state
        .session_manager
        .register(RegisterParams {
            name: req.name,
            email: req.email,
            password: req.password,
            company_name: req.company_name,
        })
        .await?;

    let jar = cookies::set_token_pair(jar, &tokens, &state.config.auth);

    Ok((
        jar,
        Json(AuthResponse {
            account: account.into(),
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }),
    ))
}

/// POST /auth/login — sets both auth cookies.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    validate_payload(&req)?;

    let (account, tokens) = state.session_manager.login(&req.email, &req.password).await?;
    let jar = cookies::set_token_pair(jar, &tokens, &state.config.auth);

    Ok((
        jar,
        Json(AuthResponse {
            account: account.into(),
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }),
    ))
}

/// POST /auth/refresh — exchanges the refresh cookie for a new access cookie.
///
/// The refresh token is not rotated.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<RefreshResponse>), AppError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::unauthorized(AUTH_FAILED))?;

    let (access_token, access_expires_at) = state.session_manager.refresh(&refresh_token).await?;
    let jar = cookies::set_access_token(jar, access_token, &state.config.auth);

    Ok((jar, Json(RefreshResponse { access_expires_at })))
}

/// POST /auth/logout — revokes whatever tokens are present and clears both
/// cookies. Idempotent: no cookies is still a successful logout.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    state
        .session_manager
        .logout(access.as_deref(), refresh.as_deref());

    let jar = cookies::clear_auth_cookies(jar);
    (jar, Json(MessageResponse::new("Logged out")))
}
