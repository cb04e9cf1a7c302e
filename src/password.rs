use pbkdf2::{
    Pbkdf2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;

// 8-byte salt, for compatibility with hashes already in existing databases.
const SALT_LEN: usize = 8;

/// Derives a PBKDF2-SHA256 hash of the password, PHC string format.
pub fn hash(password: &str) -> anyhow::Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("failed to encode salt: {e}"))?;

    let hash = Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
pub fn verify(stored: &str, password: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!("failed to parse password hash: {err}");
            return false;
        }
    };

    Pbkdf2
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
