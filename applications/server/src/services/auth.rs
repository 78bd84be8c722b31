/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{DateTime, Duration, Utc};
use countdown_core::AccountId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Longest token lifetime the service will issue
pub const MAX_TOKEN_LIFETIME_HOURS: u64 = 24 * 365;

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiration: Duration,
    bcrypt_cost: u32,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("access_token_expiration", &self.access_token_expiration)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

/// A freshly issued bearer token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthService {
    /// Lifetimes above [`MAX_TOKEN_LIFETIME_HOURS`] are clamped to it
    pub fn new(secret: &str, access_expiration_hours: u64) -> Self {
        let hours = access_expiration_hours.min(MAX_TOKEN_LIFETIME_HOURS);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiration: Duration::hours(hours as i64),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor (tests use the minimum)
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Hash a password with bcrypt on the blocking pool
    pub async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    /// Verify a password against a bcrypt hash on the blocking pool
    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("verification task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    /// Create an access token
    pub fn create_access_token(&self, account_id: AccountId) -> Result<AccessToken> {
        let now = Utc::now();
        let expires_at = now + self.access_token_expiration;

        let claims = Claims {
            sub: account_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(AccessToken { token, expires_at })
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify an access token and return the account it was issued to
    pub fn verify_access_token(&self, token: &str) -> Result<AccountId> {
        let claims = self.verify_token(token)?;
        claims
            .sub
            .parse()
            .map_err(|_| ServerError::Auth("Invalid token subject".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("secret", 24).with_bcrypt_cost(4)
    }


    #[test]
    fn test_token_creation_and_verification() {
        let auth = service();
        let account_id = AccountId::new(123);

        let access = auth.create_access_token(account_id).unwrap();
        let verified_id = auth.verify_access_token(&access.token).unwrap();
        assert_eq!(verified_id, account_id);
    }

    #[test]
    fn test_expiry_is_configured_lifetime() {
        let auth = service();
        let before = Utc::now();
        let access = auth.create_access_token(AccountId::new(1)).unwrap();
        let after = Utc::now();

        assert!(access.expires_at >= before + Duration::hours(24));
        assert!(access.expires_at <= after + Duration::hours(24));
    }

    #[test]
    fn test_huge_lifetime_is_clamped() {
        let auth = AuthService::new("secret", u64::MAX);
        let before = Utc::now();
        let access = auth.create_access_token(AccountId::new(1)).unwrap();

        let max = Duration::hours(MAX_TOKEN_LIFETIME_HOURS as i64);
        assert!(access.expires_at - before <= max + Duration::minutes(1));
        assert!(auth.verify_access_token(&access.token).is_ok());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = AuthService::new("one-secret", 24);
        let verifier = AuthService::new("another-secret", 24);

        let access = issuer.create_access_token(AccountId::new(5)).unwrap();
        assert!(verifier.verify_access_token(&access.token).is_err());
    }

    #[tokio::test]
    async fn test_password_hashing() {
        let auth = service();

        let hash = auth.hash_password("pw123".to_string()).await.unwrap();
        assert!(auth
            .verify_password("pw123".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!auth
            .verify_password("pw124".to_string(), hash)
            .await
            .unwrap());
    }
}
