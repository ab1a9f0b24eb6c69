use serde::Serialize;

use crate::auth::{TokenPair, TokenService};
use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;

/// Signup/login response: the stored user plus a fresh token pair.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, ApiError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let hashed = bcrypt::hash(password, self.bcrypt_cost)?;
        let user = self.users.insert(username, email, &hashed).await?;
        tracing::info!(user_id = user.id, "user registered");

        let tokens = self.tokens.issue_pair(user.id, &user.email)?;
        Ok(AuthPayload { user, tokens })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        // Same message whether the email is unknown or the password is wrong.
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(invalid_credentials());
        };
        if !bcrypt::verify(password, &user.password)? {
            tracing::warn!(user_id = user.id, "login rejected: password mismatch");
            return Err(invalid_credentials());
        }

        let tokens = self.tokens.issue_pair(user.id, &user.email)?;
        Ok(AuthPayload { user, tokens })
    }

    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        Ok(self.tokens.refresh(refresh_token)?)
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}
