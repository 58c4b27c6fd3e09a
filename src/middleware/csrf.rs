use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::auth::csrf::{verify, CSRF_HEADER};
use crate::auth::session::{hash_token, SESSION_COOKIE};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

/// CSRF layer for the API router. A mutating request made with a live
/// session must carry the session's token in the `x-csrf-token` header.
/// Requests without a resolvable session pass through: the token is bound to
/// a session, and the authentication gate rejects those requests where it
/// matters (this is what lets login itself work).
pub async fn require_csrf(
    State(state): State<SharedState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    if matches!(
        *req.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return next.run(req).await;
    }

    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return next.run(req).await;
    };

    let session = match db::sessions::find_by_token_hash(&state.pool, &hash_token(cookie.value()))
        .await
    {
        Ok(Some(session)) => session,
        Ok(None) => return next.run(req).await,
        Err(e) => return AppError::Database(e).into_response(),
    };

    let presented = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(token) if verify(token, &session.csrf_secret) => next.run(req).await,
        _ => AppError::Forbidden("Invalid CSRF token".to_string()).into_response(),
    }
}
