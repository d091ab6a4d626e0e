//! Password hashing boundary. A mismatch is `Ok(false)`; only hash-machinery
//! failures surface as errors.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::foyer::error::Error;

/// Hash a password for storage.
///
/// # Errors
/// Returns an error if the hash could not be generated.
pub fn hash_password(password: &str) -> Result<String, Error> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Compare a candidate password against a stored hash.
///
/// # Errors
/// Returns an error if the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, Error> {
    Ok(verify(password, password_hash)?)
}
