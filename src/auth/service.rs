use crate::auth::claims::TokenClass;
use crate::auth::jwt::{TokenCodec, TokenError};
use crate::auth::password::{CredentialVerifier, PasswordHasher};
use crate::db::{User, UserStore};
use crate::types::{AppError, Result, TokenPair};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Turns verified credentials or refresh tokens into fresh token pairs.
///
/// Each call is independent; shared state is the immutable codec and a
/// decoy hash built on first use.
#[derive(Clone)]
pub struct SessionIssuer {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    verifier: CredentialVerifier,
    codec: Arc<TokenCodec>,
    decoy_hash: Arc<OnceLock<String>>,
}

// Hashed once, then verified against when a login names an unknown email.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

fn mint_failed(err: TokenError) -> AppError {
    AppError::Internal(err.to_string())
}

impl SessionIssuer {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            store,
            verifier: CredentialVerifier::new(hasher.clone()),
            hasher,
            codec,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Creates a user account. No tokens are minted.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<User> {
        if self.store.get_user_by_email(email).await?.is_some() {
            debug!("registration rejected: email taken");
            return Err(AppError::AlreadyExists(email.to_string()));
        }
        if self.store.get_user_by_username(username).await?.is_some() {
            debug!("registration rejected: username taken");
            return Err(AppError::AlreadyExists(username.to_string()));
        }

        let hasher = self.hasher.clone();
        let plaintext = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user_id = Uuid::new_v4().to_string();
        let user = self
            .store
            .create_user(&user_id, email, username, &password_hash)
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Exchanges email + password for a token pair.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let Some(user) = self.store.get_user_by_email(email).await? else {
            // Unknown emails pay the same hashing cost as wrong passwords.
            self.verify_decoy(password).await?;
            return Err(AppError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self
            .codec
            .issue_pair(&user.id, &user.email)
            .map_err(mint_failed)?;

        info!(user_id = %user.id, "login succeeded");
        Ok(tokens)
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// The presented token is not revoked and stays usable until it expires.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self
            .codec
            .validate(TokenClass::Refresh, refresh_token)
            .map_err(|e| {
                debug!(reason = %e, "refresh token rejected");
                AppError::InvalidToken
            })?;

        let user = self
            .store
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "refresh token names a user that no longer exists");
                AppError::UserNotFound
            })?;

        let tokens = self
            .codec
            .issue_pair(&user.id, &user.email)
            .map_err(mint_failed)?;

        debug!(user_id = %user.id, "tokens rotated");
        Ok(tokens)
    }

    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let verifier = self.verifier.clone();
        let plaintext = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || verifier.verify(&plaintext, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }

    async fn verify_decoy(&self, password: &str) -> Result<()> {
        let hasher = self.hasher.clone();
        let verifier = self.verifier.clone();
        let decoy_hash = self.decoy_hash.clone();
        let plaintext = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let stored_hash = match decoy_hash.get() {
                Some(hash) => hash.clone(),
                None => match hasher.hash(DECOY_PASSWORD) {
                    Ok(hash) => decoy_hash.get_or_init(|| hash).clone(),
                    Err(e) => {
                        warn!(error = %e, "failed to build decoy password hash");
                        return;
                    }
                },
            };
            verifier.verify(&plaintext, &stored_hash);
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}
