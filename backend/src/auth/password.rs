//! Password hashing and verification.
//!
//! New hashes are Argon2id with a fixed work factor. Verification also
//! accepts bcrypt (`$2a$`/`$2b$`/`$2y$`) hashes written by earlier deployments
//! against the same database. Both directions are CPU-bound and deliberately
//! slow, so they run on the blocking thread pool instead of an async worker.

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use tracing::warn;

use super::errors::{AccountError, AccountResult};

#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Hasher using the production work factor (19 MiB, 2 passes, 1 lane).
    pub fn new() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }

    /// Minimal-cost parameters so test suites do not spend seconds per hash.
    #[cfg(test)]
    pub fn fast() -> Self {
        Self {
            params: Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None).unwrap(),
        }
    }

    /// Produce a salted PHC hash string for `plaintext`.
    pub async fn hash(&self, plaintext: &str) -> AccountResult<String> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| AccountError::Hashing(err.to_string()))
        })
        .await
        .map_err(|err| AccountError::Hashing(err.to_string()))?
    }

    /// Check `plaintext` against a stored hash.
    ///
    /// The parameters embedded in the hash are used, not this hasher's own. A
    /// stored value that is neither bcrypt nor a valid PHC string never
    /// verifies.
    pub async fn verify(&self, plaintext: &str, stored_hash: &str) -> AccountResult<bool> {
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || {
            if is_bcrypt(&stored_hash) {
                return verify_bcrypt(&plaintext, &stored_hash);
            }

            let parsed = match PasswordHash::new(&stored_hash) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(error = %err, "stored password hash is unreadable");
                    return false;
                }
            };
            Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|err| AccountError::Hashing(err.to_string()))
    }
}

fn is_bcrypt(stored_hash: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| stored_hash.starts_with(prefix))
}

fn verify_bcrypt(plaintext: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(plaintext, stored_hash) {
        Ok(matches) => matches,
        Err(err) => {
            warn!(error = %err, "stored bcrypt hash is unreadable");
            false
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
