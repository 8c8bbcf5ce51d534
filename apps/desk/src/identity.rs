//! # Identity Provider
//!
//! Email/password and federated sign-in, issuing HS256 session tokens.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sign_in_with_password(email, password)                                │
//! │     └── users table ── argon2 verify ──┐                               │
//! │                                        ├──► SessionTokens::issue ──►   │
//! │  sign_in_federated(id_token)           │        Session {token, jti}   │
//! │     └── HS256 verify (iss, exp) ───────┘                               │
//! │         └── unknown email? auto-provision a federated account          │
//! │                                                                         │
//! │  sign_out(session) ──► jti added to the revoked set                    │
//! │  resume(token)     ──► verify + not revoked ──► Session                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Revocation lives in process memory. A CLI restart forgets it, which is
//! why the CLI also deletes its stored token on logout.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use rch_core::validation::{validate_email, validate_password};
use rch_db::{hash_password, verify_password, AuthProvider, DbError, NewUser, UserRecord, UserRepository};

use crate::error::{AuthError, AuthResult};
use crate::state::{AuthConfig, Session, SignInMethod};

// =============================================================================
// Provider Trait
// =============================================================================

/// Authenticates desk users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Signs in with an ID token issued by the federated provider.
    async fn sign_in_federated(&self, assertion: &str) -> AuthResult<Session>;

    async fn sign_out(&self, session: &Session) -> AuthResult<()>;
}

// =============================================================================
// Session Tokens
// =============================================================================

/// Claims carried by a desk session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub method: SignInMethod,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID, doubles as the session id
    pub jti: String,
}

/// Issues and validates session tokens.
pub struct SessionTokens {
    secret: String,
    lifetime_secs: i64,
}

impl SessionTokens {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        SessionTokens {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Issues a session for an account.
    pub fn issue(&self, user: &UserRecord, method: SignInMethod) -> AuthResult<Session> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(self.lifetime_secs)).timestamp();
        // Whole seconds, matching what `resume` reads back from `exp`
        let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::Token("session lifetime out of range".to_string()))?;

        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            method,
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token(format!("Failed to generate token: {}", e)))?;

        Ok(Session {
            session_id: claims.jti,
            user_id: claims.sub,
            email: claims.email,
            display_name: claims.name,
            method,
            token,
            expires_at,
        })
    }

    /// Validates and decodes a session token.
    pub fn validate(&self, token: &str) -> AuthResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(token_data.claims)
    }
}

// =============================================================================
// Federated Assertions
// =============================================================================

/// Claims read from a federated ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedClaims {
    pub iss: String,
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
}

/// Verifies HS256 ID tokens from one configured issuer.
pub struct FederatedVerifier {
    issuer: String,
    secret: String,
}

impl FederatedVerifier {
    pub fn new(issuer: impl Into<String>, secret: impl Into<String>) -> Self {
        FederatedVerifier {
            issuer: issuer.into(),
            secret: secret.into(),
        }
    }

    pub fn verify(&self, assertion: &str) -> AuthResult<FederatedClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_aud = false;

        let token_data = decode::<FederatedClaims>(
            assertion,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::AssertionRejected(e.to_string()))?;

        Ok(token_data.claims)
    }
}

// =============================================================================
// Local Provider
// =============================================================================

/// Identity provider backed by the local `users` table.
pub struct LocalIdentityProvider {
    users: UserRepository,
    tokens: SessionTokens,
    federated: Option<FederatedVerifier>,
    revoked: RwLock<HashSet<String>>,
}

impl LocalIdentityProvider {
    pub fn new(users: UserRepository, tokens: SessionTokens) -> Self {
        LocalIdentityProvider {
            users,
            tokens,
            federated: None,
            revoked: RwLock::new(HashSet::new()),
        }
    }

    /// Enables federated sign-in.
    pub fn with_federated(mut self, verifier: FederatedVerifier) -> Self {
        self.federated = Some(verifier);
        self
    }

    pub fn from_config(users: UserRepository, config: &AuthConfig) -> Self {
        let provider = LocalIdentityProvider::new(
            users,
            SessionTokens::new(config.session_secret.clone(), config.session_lifetime_secs),
        );

        match config.federated() {
            Some((issuer, secret)) => provider.with_federated(FederatedVerifier::new(issuer, secret)),
            None => provider,
        }
    }

    /// Creates a password account.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<UserRecord> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let user = self
            .users
            .insert(&NewUser {
                email,
                password_hash: Some(hash_password(password)?),
                display_name: display_name.map(str::to_string),
                provider: AuthProvider::Password,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Created account");
        Ok(user)
    }

    /// Rebuilds a session from a stored token, rejecting signed-out ones.
    pub async fn resume(&self, token: &str) -> AuthResult<Session> {
        let claims = self.tokens.validate(token)?;

        if self.revoked.read().await.contains(&claims.jti) {
            return Err(AuthError::SessionRevoked);
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::InvalidSession("exp out of range".to_string()))?;

        Ok(Session {
            session_id: claims.jti,
            user_id: claims.sub,
            email: claims.email,
            display_name: claims.name,
            method: claims.method,
            token: token.to_string(),
            expires_at,
        })
    }

    async fn find_or_provision(&self, claims: &FederatedClaims) -> AuthResult<UserRecord> {
        let email = validate_email(&claims.email)?;

        if let Some(user) = self.users.find_by_email(&email).await? {
            return Ok(user);
        }

        let new_user = NewUser {
            email: email.clone(),
            password_hash: None,
            display_name: claims.name.clone(),
            provider: AuthProvider::Federated,
        };

        match self.users.insert(&new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "Provisioned federated account");
                Ok(user)
            }
            // Another desk provisioned the same address first
            Err(DbError::UniqueViolation { .. }) => self
                .users
                .find_by_email(&email)
                .await?
                .ok_or(AuthError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!(email = %email, "Sign-in for unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        let Some(hash) = user.password_hash.as_deref() else {
            debug!(email = %email, "Password sign-in for a federated-only account");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, hash) {
            warn!(email = %email, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.tokens.issue(&user, SignInMethod::Password)?;
        info!(user_id = %session.user_id, session_id = %session.session_id, "Signed in");
        Ok(session)
    }

    async fn sign_in_federated(&self, assertion: &str) -> AuthResult<Session> {
        let verifier = self.federated.as_ref().ok_or(AuthError::FederatedDisabled)?;
        let claims = verifier.verify(assertion)?;
        let user = self.find_or_provision(&claims).await?;

        let session = self.tokens.issue(&user, SignInMethod::Federated)?;
        info!(
            user_id = %session.user_id,
            session_id = %session.session_id,
            issuer = %claims.iss,
            "Signed in with federated identity"
        );
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        let claims = self.tokens.validate(&session.token)?;

        if !self.revoked.write().await.insert(claims.jti) {
            return Err(AuthError::SessionRevoked);
        }

        info!(session_id = %session.session_id, "Signed out");
        Ok(())
    }
}
