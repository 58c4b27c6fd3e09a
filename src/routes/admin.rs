use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::{Team, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateTeam {
    pub name: String,
}

#[derive(Deserialize)]
pub struct AssignTeam {
    pub team_id: i64,
}

#[derive(Deserialize)]
pub struct ChangeRole {
    pub role: String,
}

pub async fn create_team(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateTeam>,
) -> Result<Json<Team>, AppError> {
    auth.require_role(Role::Admin)?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Team name is required".to_string()));
    }

    let team = db::teams::create(&state.pool, req.name.trim())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A team with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;
    Ok(Json(team))
}

pub async fn list_teams(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Team>>, AppError> {
    auth.require_role(Role::Admin)?;
    let teams = db::teams::list(&state.pool).await?;
    Ok(Json(teams))
}

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_role(Role::Admin)?;
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

/// Put a user on a team: updates their primary team context and the
/// membership relation in one go.
pub async fn assign_team(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Json(req): Json<AssignTeam>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(Role::Admin)?;

    db::teams::find_by_id(&state.pool, req.team_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;
    db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    db::users::update_team(&state.pool, user_id, req.team_id).await?;
    db::teams::add_member(&state.pool, req.team_id, user_id, "member").await?;

    Ok(Json(json!({ "success": true })))
}

/// Take a user off their team. Clearing the primary team context means any
/// access derived from it ends on the user's next request.
pub async fn remove_from_team(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(Role::Admin)?;

    let user = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(team_id) = user.team_id {
        db::teams::remove_member(&state.pool, team_id, user_id).await?;
        db::users::clear_team(&state.pool, user_id).await?;
    }

    Ok(Json(json!({ "success": true })))
}

pub async fn change_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Json(req): Json<ChangeRole>,
) -> Result<Json<Value>, AppError> {
    auth.require_role(Role::Admin)?;

    if !matches!(req.role.as_str(), "employee" | "manager" | "admin") {
        return Err(AppError::BadRequest(format!("Unknown role: {}", req.role)));
    }

    db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    db::users::update_role(&state.pool, user_id, &req.role).await?;

    Ok(Json(json!({ "success": true })))
}
