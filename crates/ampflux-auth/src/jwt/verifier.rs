//! JWT token validation with revocation checking.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use ampflux_core::config::auth::AuthConfig;

use crate::revocation::RevocationList;

use super::claims::{Claims, TokenKind};

/// Why a token failed verification.
///
/// Callers at the HTTP boundary must collapse all variants into one opaque
/// unauthorized response; the distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed token or bad signature.
    #[error("token is invalid")]
    Invalid,
    /// Signature is valid but the token is past its expiry.
    #[error("token has expired")]
    Expired,
    /// A refresh token was presented where an access token was expected,
    /// or vice versa.
    #[error("wrong token kind")]
    WrongKind,
    /// The token was revoked before its natural expiry.
    #[error("token has been revoked")]
    Revoked,
}

/// Validates JWT tokens against the signing key and the revocation list.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Injected revocation list, keyed by raw token string.
    revocations: Arc<RevocationList>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration and a revocation list.
    pub fn new(config: &AuthConfig, revocations: Arc<RevocationList>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Verifies a token and checks it is of the expected kind.
    ///
    /// Check order:
    /// 1. Revocation — wins even while the token is still cryptographically
    ///    valid, so a logged-out credential is dead immediately.
    /// 2. Signature and expiry.
    /// 3. Kind claim matches `expected`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        if self.revocations.is_revoked(token) {
            return Err(TokenError::Revoked);
        }

        let claims = self.decode(token)?;

        if claims.kind != expected {
            return Err(TokenError::WrongKind);
        }

        Ok(claims)
    }

    /// Adds a token to the revocation list for the remainder of its natural
    /// expiry. Tokens that do not carry a valid signature are ignored — they
    /// can never pass verification in the first place.
    pub fn revoke(&self, token: &str) {
        let mut validation = self.validation.clone();
        validation.validate_exp = false;

        if let Ok(data) = decode::<Claims>(token, &self.decoding_key, &validation) {
            self.revocations.revoke(token, data.claims.expires_at());
        }
    }

    /// Internal decode without kind checking.
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
