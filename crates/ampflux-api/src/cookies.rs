//! Auth cookie contract.
//!
//! The bearer credentials ride in cookies, not headers: `access_token`
//! (short TTL) and `refresh_token` (long TTL), both HttpOnly and
//! SameSite=Lax. `Secure` follows configuration so plain-HTTP development
//! setups keep working. Cookie lifetime is left to the session; the JWT
//! expiry inside is what actually bounds validity.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use ampflux_auth::jwt::TokenPair;
use ampflux_core::config::auth::AuthConfig;

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build one auth cookie.
fn auth_cookie(name: &'static str, value: String, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

/// Set both auth cookies from a freshly issued token pair.
pub fn set_token_pair(jar: CookieJar, tokens: &TokenPair, config: &AuthConfig) -> CookieJar {
    jar.add(auth_cookie(
        ACCESS_COOKIE,
        tokens.access_token.clone(),
        config,
    ))
    .add(auth_cookie(
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        config,
    ))
}

/// Replace only the access cookie (refresh flow).
pub fn set_access_token(jar: CookieJar, access_token: String, config: &AuthConfig) -> CookieJar {
    jar.add(auth_cookie(ACCESS_COOKIE, access_token, config))
}

/// Clear both auth cookies (logout).
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(ACCESS_COOKIE))
        .remove(removal_cookie(REFRESH_COOKIE))
}

/// A removal cookie must match the path the cookie was set with.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}
