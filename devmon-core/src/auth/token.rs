/// Signed, time-limited email confirmation tokens
///
/// A confirmation token proves control of an account's email address. It is
/// a compact JWS (HS256) whose payload carries the user id under `confirm`
/// together with issue and expiry timestamps. Tokens are opaque to callers:
/// they are handed out in confirmation emails and passed back verbatim.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: one hour unless the caller chooses otherwise
/// - **Leeway**: none; a token is rejected the moment `exp` has passed
/// - **Secret**: injected on every call; rotating it invalidates every
///   outstanding token
///
/// # Example
///
/// ```
/// use devmon_core::auth::token::{
///     create_confirmation_token, validate_confirmation_token, ConfirmationClaims,
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-key-that-is-at-least-32-bytes";
/// let token = create_confirmation_token(&ConfirmationClaims::new(42), secret)?;
///
/// let claims = validate_confirmation_token(&token, secret)?;
/// assert_eq!(claims.confirm, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default confirmation token lifetime in seconds
pub const DEFAULT_CONFIRMATION_TTL_SECONDS: i64 = 3600;

/// Error type for confirmation token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature or payload rejected
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Payload of a confirmation token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationClaims {
    /// Id of the user whose email is being confirmed
    pub confirm: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl ConfirmationClaims {
    /// Creates claims for `user_id` with the default one hour lifetime
    pub fn new(user_id: i32) -> Self {
        let iat = Utc::now().timestamp();

        Self {
            confirm: user_id,
            iat,
            exp: iat + DEFAULT_CONFIRMATION_TTL_SECONDS,
        }
    }

    /// Creates claims for `user_id` expiring `expires_in` from now
    ///
    /// A negative duration produces claims that are already expired.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::CreateError` if the expiry falls outside the
    /// representable date range
    pub fn with_expiration(user_id: i32, expires_in: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now.checked_add_signed(expires_in).ok_or_else(|| {
            TokenError::CreateError(format!("Expiration out of range: {}", expires_in))
        })?;

        Ok(Self {
            confirm: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Like [`ConfirmationClaims::with_expiration`] with a lifetime in seconds
    pub fn with_expiration_seconds(user_id: i32, seconds: i64) -> Result<Self, TokenError> {
        let expires_in = Duration::try_seconds(seconds).ok_or_else(|| {
            TokenError::CreateError(format!("Expiration out of range: {}s", seconds))
        })?;

        Self::with_expiration(user_id, expires_in)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signs confirmation claims with `secret`
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails
pub fn create_confirmation_token(
    claims: &ConfirmationClaims,
    secret: &str,
) -> Result<String, TokenError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a confirmation token and extracts its claims
///
/// Checks the signature against `secret` and rejects the token once `exp`
/// has passed.
///
/// # Errors
///
/// - `TokenError::Expired` if the token is past its expiry
/// - `TokenError::ValidationError` for a bad signature, a malformed token,
///   or a payload that doesn't carry confirmation claims
pub fn validate_confirmation_token(
    token: &str,
    secret: &str,
) -> Result<ConfirmationClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;

    let token_data = decode::<ConfirmationClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
