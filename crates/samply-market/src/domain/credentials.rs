//! # Credentials
//!
//! Salted SHA-256 password digests. The plaintext password never reaches the
//! store; login recomputes the digest, so matching stays exact and
//! case-sensitive.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Stored password credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Hex-encoded SHA-256(salt ‖ password).
    pub password_hash: String,
    /// Hex-encoded random salt.
    pub password_salt: String,
}

impl Credential {
    /// Derive a credential with a fresh random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, &salt)
    }

    /// Derive a credential with a caller-chosen salt.
    pub fn with_salt(password: &str, salt: &[u8]) -> Self {
        Self {
            password_hash: hex::encode(digest(salt, password)),
            password_salt: hex::encode(salt),
        }
    }

    /// Check a candidate password against the stored digest.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.password_salt) else {
            return false;
        };
        hex::encode(digest(&salt, password)) == self.password_hash
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}
