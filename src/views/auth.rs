use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::session::{hash_token, SESSION_COOKIE};
use crate::db;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate;

pub async fn login_page(State(state): State<SharedState>, jar: CookieJar) -> Response {
    // Already signed in: straight to the dashboard.
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(Some(_)) =
            db::sessions::find_by_token_hash(&state.pool, &hash_token(cookie.value())).await
        {
            return Redirect::to("/dashboard").into_response();
        }
    }

    Html(LoginTemplate.render().unwrap_or_default()).into_response()
}
