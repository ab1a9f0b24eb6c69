use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Bcrypt hash. Never serialized to callers.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}
