use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::role::Role;
use crate::auth::session::{hash_token, SESSION_COOKIE};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

/// Point-in-time snapshot of the caller, resolved from the session cookie at
/// the start of the request. Role or team changes land on the next request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub team_id: Option<i64>,
}

impl AuthUser {
    /// Rank comparison against the fixed employee < manager < admin order.
    pub fn require_role(&self, required: Role) -> Result<(), AppError> {
        if self.role >= required {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

        let user = db::sessions::find_user_by_token_hash(&state.pool, &hash_token(&token))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

        Ok(AuthUser {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: Role::parse(&user.role),
            team_id: user.team_id,
        })
    }
}
