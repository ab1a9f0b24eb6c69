use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// JWT payload. Wire keys are camelCase to match the public API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub user_email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i32, user_email: String, ttl: Duration) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            user_id,
            user_email,
            iat,
            exp: iat + ttl.as_secs() as i64,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("token generation failed: {0}")]
    Generation(String),

    #[error("invalid or expired token")]
    Invalid,
}

/// Access/refresh pair minted together on signup, login, and refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies signed, time-limited bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue(&self, user_id: i32, email: &str, ttl: Duration) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let claims = Claims::new(user_id, email.to_string(), ttl);
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn issue_pair(&self, user_id: i32, email: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, email, self.access_ttl)?,
            refresh_token: self.issue(user_id, email, self.refresh_ttl)?,
        })
    }

    /// Checks signature and expiry (no leeway). Does not consult storage;
    /// the auth middleware additionally verifies the user still exists.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
    }

    /// Verifies a refresh token and mints a fresh pair for the same identity.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let claims = self.verify(refresh_token)?;
        self.issue_pair(claims.user_id, &claims.user_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(
            "test-secret",
            Duration::from_secs(900),
            Duration::from_secs(86400),
        )
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let tokens = service();
        let token = tokens
            .issue(42, "jane@example.com", Duration::from_secs(60))
            .unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.user_email, "jane@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_preserves_identity() {
        let tokens = service();
        let pair = tokens.issue_pair(7, "sam@example.com").unwrap();

        let refreshed = tokens.refresh(&pair.refresh_token).unwrap();
        let claims = tokens.verify(&refreshed.access_token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.user_email, "sam@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let tokens = service();
        let other = TokenService::new(
            "other-secret",
            Duration::from_secs(900),
            Duration::from_secs(86400),
        );

        let token = tokens
            .issue(1, "a@b.com", Duration::from_secs(60))
            .unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();
        let token = tokens.issue(1, "a@b.com", Duration::ZERO).unwrap();

        std::thread::sleep(Duration::from_millis(1100));
        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let tokens = TokenService::new("", Duration::from_secs(60), Duration::from_secs(60));
        assert!(matches!(
            tokens.issue(1, "a@b.com", Duration::from_secs(60)),
            Err(TokenError::MissingSecret)
        ));
    }
}
