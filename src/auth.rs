//! Password hashing, token issuance, and the authentication service behind
//! the login, refresh, and logout operations.

use crate::config::AuthConfig;
use crate::database::repositories::{AuthenticationRepository, UserRepository};
use crate::database::Database;
use crate::domain::users::UserLogin;
use crate::domain::{DomainError, DomainResult, Payload};
use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash as ParsedHash, PasswordHasher as _, PasswordVerifier as _};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const WRONG_CREDENTIALS: &str = "kredensial yang Anda masukkan salah";

/// Password hashing boundary used by registration and login.
pub trait PasswordHash: Send + Sync {
    fn hash(&self, plain: &str) -> DomainResult<String>;
    /// Fails with `Unauthenticated` when the password does not match.
    fn verify(&self, plain: &str, stored: &str) -> DomainResult<()>;
}

pub struct Argon2PasswordHash;

impl Argon2PasswordHash {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHash {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHash for Argon2PasswordHash {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| anyhow!("password hashing failed: {err}"))?;
        Ok(hashed.to_string())
    }

    fn verify(&self, plain: &str, stored: &str) -> DomainResult<()> {
        let parsed = ParsedHash::new(stored)
            .map_err(|err| anyhow!("stored password hash is malformed: {err}"))?;
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .map_err(|_| DomainError::Unauthenticated(WRONG_CREDENTIALS.into()))
    }
}

/// Identity carried inside a verified token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    username: String,
    iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Token issuance and verification boundary. Access and refresh tokens are
/// signed with separate keys; refresh tokens never expire and are revoked by
/// deleting them from storage instead.
pub trait TokenManager: Send + Sync {
    fn create_access_token(&self, claims: &TokenClaims) -> DomainResult<String>;
    fn create_refresh_token(&self, claims: &TokenClaims) -> DomainResult<String>;
    /// Fails with `Unauthenticated` for anything but a valid, unexpired
    /// access token.
    fn verify_access_token(&self, token: &str) -> DomainResult<TokenClaims>;
    /// Fails with `Invariant` when the token is not a validly signed refresh
    /// token.
    fn verify_refresh_token(&self, token: &str) -> DomainResult<TokenClaims>;
}

pub struct JwtTokenManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_age_secs: i64,
}

impl JwtTokenManager {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(auth.access_token_key.as_bytes()),
            access_decoding: DecodingKey::from_secret(auth.access_token_key.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(auth.refresh_token_key.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(auth.refresh_token_key.as_bytes()),
            access_token_age_secs: auth.access_token_age_secs,
        }
    }
}

impl TokenManager for JwtTokenManager {
    fn create_access_token(&self, claims: &TokenClaims) -> DomainResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: claims.id.clone(),
            username: claims.username.clone(),
            iat: now,
            exp: Some(now + self.access_token_age_secs),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(|err| anyhow!("failed to sign access token: {err}"))?;
        Ok(token)
    }

    fn create_refresh_token(&self, claims: &TokenClaims) -> DomainResult<String> {
        let claims = Claims {
            id: claims.id.clone(),
            username: claims.username.clone(),
            iat: Utc::now().timestamp(),
            exp: None,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(|err| anyhow!("failed to sign refresh token: {err}"))?;
        Ok(token)
    }

    fn verify_access_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let data = decode::<Claims>(
            token,
            &self.access_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| DomainError::Unauthenticated("invalid authentication".into()))?;
        Ok(TokenClaims {
            id: data.claims.id,
            username: data.claims.username,
        })
    }

    fn verify_refresh_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(token, &self.refresh_decoding, &validation)
            .map_err(|_| DomainError::Invariant("refresh token tidak valid".into()))?;
        Ok(TokenClaims {
            id: data.claims.id,
            username: data.claims.username,
        })
    }
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthentication {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login, token refresh, and logout over the user and authentication stores.
#[derive(Clone)]
pub struct AuthService {
    database: Database,
    password_hash: Arc<dyn PasswordHash>,
    token_manager: Arc<dyn TokenManager>,
}

impl AuthService {
    pub fn new(
        database: Database,
        password_hash: Arc<dyn PasswordHash>,
        token_manager: Arc<dyn TokenManager>,
    ) -> Self {
        Self {
            database,
            password_hash,
            token_manager,
        }
    }

    /// An unknown username and a wrong password are indistinguishable to the
    /// caller: both fail `Unauthenticated` with the same message.
    pub fn login(&self, payload: &Value) -> DomainResult<NewAuthentication> {
        let login = UserLogin::parse(payload)?;
        let lookup = self.database.with_repositories(|repos| {
            let users = repos.users();
            let password = users.get_password_by_username(&login.username)?;
            let id = users.get_id_by_username(&login.username)?;
            Ok((id, password))
        });
        let (user_id, stored_password) = match lookup {
            Err(DomainError::NotFound(_)) => {
                return Err(DomainError::Unauthenticated(WRONG_CREDENTIALS.into()))
            }
            other => other?,
        };
        self.password_hash.verify(&login.password, &stored_password)?;

        let claims = TokenClaims {
            id: user_id,
            username: login.username,
        };
        let access_token = self.token_manager.create_access_token(&claims)?;
        let refresh_token = self.token_manager.create_refresh_token(&claims)?;
        self.database
            .with_repositories(|repos| repos.authentications().add_token(&refresh_token))?;
        Ok(NewAuthentication {
            access_token,
            refresh_token,
        })
    }

    /// Exchanges a stored refresh token for a fresh access token.
    pub fn refresh(&self, payload: &Value) -> DomainResult<String> {
        let fields = Payload::new("REFRESH_AUTHENTICATION", payload);
        fields.require(&["refreshToken"])?;
        let refresh_token = fields.string("refreshToken")?;

        let claims = self.token_manager.verify_refresh_token(&refresh_token)?;
        self.database.with_repositories(|repos| {
            repos.authentications().check_token_availability(&refresh_token)
        })?;
        self.token_manager.create_access_token(&claims)
    }

    pub fn logout(&self, payload: &Value) -> DomainResult<()> {
        let fields = Payload::new("DELETE_AUTHENTICATION", payload);
        fields.require(&["refreshToken"])?;
        let refresh_token = fields.string("refreshToken")?;

        self.database.with_repositories(|repos| {
            let authentications = repos.authentications();
            authentications.check_token_availability(&refresh_token)?;
            authentications.delete_token(&refresh_token)
        })
    }

    pub fn verify_access_token(&self, token: &str) -> DomainResult<TokenClaims> {
        self.token_manager.verify_access_token(token)
    }
}
