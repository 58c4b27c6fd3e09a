use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::auth::session::{self, SESSION_COOKIE};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub team_id: Option<i64>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub csrf_token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

impl From<crate::models::User> for UserInfo {
    fn from(user: crate::models::User) -> Self {
        UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            team_id: user.team_id,
        }
    }
}

pub async fn register(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock so two concurrent first registrations cannot both
    // become the bootstrap admin.
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::users::count_all(&mut *tx).await?;
    let role = if count == 0 { "admin" } else { "employee" };

    let user = db::users::create(&mut *tx, &req.name, &req.email, &pw_hash, role)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("An account with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tx.commit().await?;

    let presented = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (token, session) =
        session::establish(&state.pool, user.id, presented.as_deref()).await?;

    let secure = state.config.base_url.starts_with("https://");
    let jar = jar.add(session::session_cookie(&token, secure));

    Ok((
        jar,
        Json(SessionResponse {
            success: true,
            csrf_token: session.csrf_secret,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash)
        .map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.reset(&req.email);

    let presented = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (token, session) =
        session::establish(&state.pool, user.id, presented.as_deref()).await?;

    let secure = state.config.base_url.starts_with("https://");
    let jar = jar.add(session::session_cookie(&token, secure));

    Ok((
        jar,
        Json(SessionResponse {
            success: true,
            csrf_token: session.csrf_secret,
            user: user.into(),
        }),
    ))
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        db::sessions::delete_by_hash(&state.pool, &session::hash_token(cookie.value())).await?;
    }

    let jar = jar.add(session::clear_session_cookie());
    Ok((jar, Json(LogoutResponse { success: true })))
}

/// Current-user snapshot plus the session's CSRF token, fetched by the
/// widget layer on page load.
pub async fn me(
    State(state): State<SharedState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<Json<SessionResponse>, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let session = db::sessions::find_by_token_hash(
        &state.pool,
        &session::hash_token(cookie.value()),
    )
    .await?
    .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    Ok(Json(SessionResponse {
        success: true,
        csrf_token: session.csrf_secret,
        user: UserInfo {
            id: auth.user_id,
            name: auth.name,
            email: auth.email,
            role: auth.role.to_string(),
            team_id: auth.team_id,
        },
    }))
}
