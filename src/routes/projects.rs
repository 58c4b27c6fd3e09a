use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::access::check_project_access;
use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects =
        db::projects::list_accessible(&state.pool, auth.user_id, auth.team_id).await?;
    Ok(Json(projects))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<Json<Project>, AppError> {
    auth.require_role(Role::Manager)?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Project name is required".to_string()));
    }

    let project =
        db::projects::create(&state.pool, req.name.trim(), &req.description, auth.user_id)
            .await?;
    Ok(Json(project))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    check_project_access(&state.pool, id, &auth).await?;

    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}
