//! Password hashing via bcrypt.
//!
//! Only the non-truncating bcrypt entry points are used: a password bcrypt
//! cannot hash in full is refused rather than silently shortened.

use std::sync::LazyLock;

use bcrypt::BcryptError;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash checked when a login names an unknown user.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("shelf-unknown-user").ok());

/// Hash a password with bcrypt (cost 10).
///
/// Fails with [`AuthError::PasswordTooLong`] when the password exceeds what
/// bcrypt can hash without truncation.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::non_truncating_hash(password, BCRYPT_COST).map_err(|e| match e {
        BcryptError::Truncation(_) => AuthError::PasswordTooLong,
        other => AuthError::Internal(format!("bcrypt hash: {other}")),
    })
}

/// Verify a password against a bcrypt hash.
///
/// A password too long to have been hashed never matches.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    match bcrypt::non_truncating_verify(password, hash) {
        Ok(valid) => Ok(valid),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!("bcrypt verify: {e}"))),
    }
}

/// Spend one bcrypt verification on a login for a username that does not
/// exist, so it costs as much as a wrong password. Always `false`.
pub fn verify_unknown_user(password: &str) -> bool {
    if let Some(hash) = UNKNOWN_USER_HASH.as_deref() {
        let _ = bcrypt::non_truncating_verify(password, hash);
    }
    false
}
