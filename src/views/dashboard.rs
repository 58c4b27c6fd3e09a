use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    user_name: String,
    role: String,
    unread: i64,
    projects: Vec<ProjectRow>,
}

struct ProjectRow {
    id: i64,
    name: String,
    created_at: String,
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let projects =
        db::projects::list_accessible(&state.pool, auth.user_id, auth.team_id).await?;
    let unread = db::notifications::unread_count(&state.pool, auth.user_id).await?;

    let projects = projects
        .into_iter()
        .map(|p| ProjectRow {
            id: p.id,
            name: p.name,
            created_at: p.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let template = DashboardTemplate {
        user_name: auth.name,
        role: auth.role.to_string(),
        unread,
        projects,
    };
    Ok(Html(template.render().unwrap_or_default()))
}
