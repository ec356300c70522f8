use crate::auth::claims::{Claims, TokenClass};
use crate::types::TokenPair;
use crate::utils::config::{ConfigError, SigningKeys};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Reasons a token fails to mint or validate.
///
/// The three validation kinds stay distinct here; the HTTP boundary decides
/// how much of the distinction a client gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            // A header naming another algorithm cannot carry a valid HS256 signature.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::Malformed,
        }
    }
}

struct ClassKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: i64,
}

impl ClassKeys {
    fn new(secret: &str, ttl: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

/// Mints and validates HS256 bearer tokens, one secret per token class.
///
/// Holds no mutable state; share it behind an `Arc` across request tasks.
pub struct TokenCodec {
    access: ClassKeys,
    refresh: ClassKeys,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from validated signing keys.
    ///
    /// Fails if the secrets are empty or shared, or if the access lifetime is
    /// not strictly shorter than the refresh lifetime.
    pub fn new(keys: &SigningKeys) -> Result<Self, ConfigError> {
        keys.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            access: ClassKeys::new(&keys.access_secret, keys.access_ttl),
            refresh: ClassKeys::new(&keys.refresh_secret, keys.refresh_ttl),
            validation,
        })
    }

    fn keys(&self, class: TokenClass) -> &ClassKeys {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// Lifetime in seconds of tokens of the given class.
    pub fn ttl(&self, class: TokenClass) -> i64 {
        self.keys(class).ttl
    }

    /// Mints a token of `class` for the subject, valid from now for `ttl(class)`.
    pub fn mint(&self, class: TokenClass, subject_id: &str, email: &str) -> Result<String, TokenError> {
        self.mint_at(class, subject_id, email, Utc::now().timestamp())
    }

    fn mint_at(
        &self,
        class: TokenClass,
        subject_id: &str,
        email: &str,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let keys = self.keys(class);
        let expires_at = issued_at.checked_add(keys.ttl).ok_or_else(|| {
            TokenError::Encoding(format!("{} token expiry overflows", class))
        })?;
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| TokenError::Encoding(format!("Failed to generate {} token: {}", class, e)))
    }

    /// Verifies a token against the secret of `class` and returns its claims.
    ///
    /// The signature is checked before the payload is deserialized, so claim
    /// contents are never read from a token that fails verification.
    pub fn validate(&self, class: TokenClass, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys(class).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// Mints a fresh access + refresh pair for the subject.
    pub fn issue_pair(&self, subject_id: &str, email: &str) -> Result<TokenPair, TokenError> {
        let access_token = self.mint(TokenClass::Access, subject_id, email)?;
        let refresh_token = self.mint(TokenClass::Refresh, subject_id, email)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access.ttl,
        })
    }
}
