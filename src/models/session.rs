use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-held session row. The browser only ever sees the raw token;
/// `token_hash` is its SHA-256 digest.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token_hash: String,
    #[serde(skip_serializing)]
    pub csrf_secret: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
