use crate::types::{AppError, Result};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;

/// One-way salted hashing of user passwords.
///
/// Implementations are CPU-bound and slow on purpose; async callers should
/// run them on the blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing (PHC) string.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Returns `Err` only when the stored hash cannot be parsed.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool>;
}

/// Argon2id password hasher.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Argon2id with explicit cost parameters (memory in KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Checks presented secrets against stored hashes.
///
/// A corrupt stored hash counts as a failed check, never as a crash.
#[derive(Clone)]
pub struct CredentialVerifier {
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialVerifier {
    pub fn new(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { hasher }
    }

    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        match self.hasher.verify(plaintext, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is unreadable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_hasher() -> Argon2Hasher {
        Argon2Hasher::with_params(1024, 1, 1).expect("valid params")
    }

    #[test]
    fn test_password_hashing() {
        let hasher = create_test_hasher();
        let password = "test_password_123";

        let hash = hasher.hash(password).expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format
        assert!(hash.starts_with("$argon2id$"), "hash should be in PHC format");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = create_test_hasher();

        let first = hasher.hash("Str0ng!Pass").unwrap();
        let second = hasher.hash("Str0ng!Pass").unwrap();

        assert_ne!(first, second, "salts should differ");
    }

    #[test]
    fn test_password_verification_success() {
        let hasher = create_test_hasher();
        let password = "secure_password_456";

        let hash = hasher.hash(password).expect("should hash password");
        let is_valid = hasher.verify(password, &hash).expect("should verify");

        assert!(is_valid, "correct password should verify successfully");
    }

    #[test]
    fn test_password_verification_failure() {
        let hasher = create_test_hasher();

        let hash = hasher.hash("correct_password").expect("should hash password");
        let is_valid = hasher.verify("wrong_password", &hash).expect("should verify");

        assert!(!is_valid, "wrong password should fail verification");
    }

    #[test]
    fn test_default_hasher_verifies_tuned_hash() {
        // Parameters travel inside the PHC string.
        let hash = create_test_hasher().hash("portable").unwrap();
        assert!(Argon2Hasher::default().verify("portable", &hash).unwrap());
    }

    #[test]
    fn test_invalid_params() {
        assert!(Argon2Hasher::with_params(1, 1, 1).is_err());
    }

    #[test]
    fn test_verifier_treats_corrupt_hash_as_mismatch() {
        let verifier = CredentialVerifier::new(Arc::new(create_test_hasher()));

        assert!(!verifier.verify("password", "not-a-phc-string"));
        assert!(!verifier.verify("password", ""));
    }

    #[test]
    fn test_verifier_delegates_to_hasher() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .times(2)
            .returning(|plaintext, hash| Ok(plaintext == "pw" && hash == "stored"));

        let verifier = CredentialVerifier::new(Arc::new(hasher));
        assert!(verifier.verify("pw", "stored"));
        assert!(!verifier.verify("other", "stored"));
    }

    #[test]
    fn test_verifier_round_trip() {
        let hasher = create_test_hasher();
        let hash = hasher.hash("Str0ng!Pass").unwrap();
        let verifier = CredentialVerifier::new(Arc::new(hasher));

        assert!(verifier.verify("Str0ng!Pass", &hash));
        assert!(!verifier.verify("Str0ng!Pasz", &hash));
    }
}
