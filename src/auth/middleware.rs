use crate::auth::claims::{Identity, TokenClass};
use crate::auth::jwt::{TokenCodec, TokenError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Why a protected request was turned away. Every variant is a `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token")]
    InvalidToken,
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.to_string() });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Validates bearer access tokens for protected routes.
#[derive(Clone)]
pub struct AccessGuard {
    codec: Arc<TokenCodec>,
}

impl AccessGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Resolves a raw `Authorization` header value into the caller's identity.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, GuardError> {
        let header = match authorization {
            Some(value) if !value.is_empty() => value,
            _ => return Err(GuardError::MissingHeader),
        };

        let mut parts = header.split(' ');
        let token = match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) => token,
            _ => return Err(GuardError::MalformedHeader),
        };

        match self.codec.validate(TokenClass::Access, token) {
            Ok(claims) => Ok(Identity::from(claims)),
            Err(TokenError::Expired) => Err(GuardError::TokenExpired),
            Err(e) => {
                tracing::debug!(reason = %e, "access token rejected");
                Err(GuardError::InvalidToken)
            }
        }
    }
}

/// Axum middleware: authenticates the request and stores the [`Identity`]
/// in its extensions before handing it to the next layer.
pub async fn require_access(
    State(guard): State<Arc<AccessGuard>>,
    mut req: Request,
    next: Next,
) -> Result<Response, GuardError> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| GuardError::MalformedHeader)?),
        None => None,
    };

    let identity = guard.authenticate(authorization)?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

// Extractor for the authenticated identity
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = GuardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or(GuardError::MissingHeader)
    }
}
