/// Credential primitives for the account store
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: signed, time-limited email confirmation tokens
///
/// Both are stateless: the confirmation secret is passed in by the caller,
/// usually from [`crate::config::Config::secret_key`].
///
/// # Example
///
/// ```
/// use devmon_core::auth::password::{hash_password, verify_password};
/// use devmon_core::auth::token::{create_confirmation_token, ConfirmationClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_confirmation_token(&ConfirmationClaims::new(1), "secret-key")?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
