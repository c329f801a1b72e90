use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a plaintext password into a PHC string with a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError::Hashing(err.to_string()))
}

/// Check a plaintext password against a stored PHC string.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| CredentialError::MalformedHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_against_original_password() {
        let hash = hash_password("correct horse").expect("hashes");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).expect("verifies"));
        assert!(!verify_password("battery staple", &hash).expect("verifies"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("secret").expect("hashes");
        let second = hash_password("secret").expect("hashes");
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hashes_are_reported() {
        assert!(matches!(
            verify_password("secret", "plaintext"),
            Err(CredentialError::MalformedHash(_))
        ));
    }
}
