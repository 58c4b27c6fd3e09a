pub mod admin;
pub mod auth;
pub mod issues;
pub mod notifications;
pub mod projects;
pub mod search;
pub mod wiki;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        // Projects
        .route("/api/v1/projects", get(projects::list).post(projects::create))
        .route("/api/v1/projects/{id}", get(projects::get))
        // Issues
        .route(
            "/api/v1/projects/{id}/issues",
            get(issues::list_by_project).post(issues::create),
        )
        .route("/api/v1/issues/{id}", get(issues::get).put(issues::update))
        .route(
            "/api/v1/issues/{id}/comments",
            get(issues::list_comments).post(issues::add_comment),
        )
        // Wiki
        .route(
            "/api/v1/projects/{id}/pages",
            get(wiki::list_by_project).post(wiki::create),
        )
        .route("/api/v1/pages/{id}", get(wiki::get).put(wiki::update))
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::feed).post(notifications::mutate),
        )
        // Search
        .route("/api/v1/search", get(search::search))
        // Admin
        .route(
            "/api/v1/admin/teams",
            get(admin::list_teams).post(admin::create_team),
        )
        .route("/api/v1/admin/users", get(admin::list_users))
        .route(
            "/api/v1/admin/users/{id}/team",
            put(admin::assign_team).delete(admin::remove_from_team),
        )
        .route("/api/v1/admin/users/{id}/role", put(admin::change_role))
}
