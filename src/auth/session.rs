use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::db;
use crate::models::Session;

pub const SESSION_COOKIE: &str = "tablero_session";

/// Session lifetime; the cookie max-age matches.
const SESSION_DAYS: i64 = 7;

/// 32 random bytes, hex-encoded. Used for both session tokens and CSRF
/// secrets (256 bits of entropy each).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Create a session for `user_id` and return the raw token to put in the
/// cookie. Any session tied to the token the browser presented is destroyed
/// first and a fresh identifier is issued, so the identifier after
/// authentication never matches one that existed before it.
pub async fn establish(
    pool: &PgPool,
    user_id: i64,
    presented_token: Option<&str>,
) -> Result<(String, Session), sqlx::Error> {
    if let Some(old) = presented_token {
        db::sessions::delete_by_hash(pool, &hash_token(old)).await?;
    }

    let token = generate_token();
    let csrf_secret = generate_token();
    let session = db::sessions::create(
        pool,
        user_id,
        &hash_token(&token),
        &csrf_secret,
        Utc::now() + Duration::days(SESSION_DAYS),
    )
    .await?;

    Ok((token, session))
}

pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unpredictable_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_and_one_way() {
        let token = generate_token();
        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), token);
    }
}
