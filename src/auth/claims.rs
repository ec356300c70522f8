//! Signed token payload and the identity derived from it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which secret and lifetime a token is minted with.
///
/// The class is never written into the payload; a token only validates under
/// the key of the class it was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenClass::Access => write!(f, "access"),
            TokenClass::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims structure
///
/// Field order is fixed so the serialized payload is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token identifier
    pub jti: String,
}

/// Authenticated caller, placed in request extensions by the access guard.
///
/// Handlers learn who is calling only through this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            email: claims.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_class_display() {
        assert_eq!(TokenClass::Access.to_string(), "access");
        assert_eq!(TokenClass::Refresh.to_string(), "refresh");
    }

    #[test]
    fn test_claims_serialize_in_field_order() {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "a@x.com".to_string(),
            iat: 100,
            exp: 200,
            jti: "id".to_string(),
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(
            json,
            r#"{"sub":"user-1","email":"a@x.com","iat":100,"exp":200,"jti":"id"}"#
        );
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "a@x.com".to_string(),
            iat: 100,
            exp: 200,
            jti: "id".to_string(),
        };

        let identity = Identity::from(claims);
        assert_eq!(identity.subject_id, "user-1");
        assert_eq!(identity.email, "a@x.com");
    }
}
