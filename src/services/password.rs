use thiserror::Error;

/// Errors that can occur while hashing or verifying passwords
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// bcrypt credential hasher
///
/// Hashing is CPU-bound; request handlers run it on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Check `password` against a stored hash
    ///
    /// A hash that is not valid bcrypt is an error, not a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        Ok(bcrypt::verify(password, hash)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(10)
    }
}
