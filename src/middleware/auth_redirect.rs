use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Page routes fail authentication by redirect, not JSON: a 401 coming out
/// of a view handler is turned into a redirect to the login page. API routes
/// are not behind this layer and keep their structured 401 body.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() == StatusCode::UNAUTHORIZED {
        Redirect::to("/auth/login").into_response()
    } else {
        response
    }
}
