use sqlx::PgPool;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;

/// Project access guard. A requester may act on a project iff they created
/// it, or its creator is a member of the requester's team. Deliberately
/// coarse (no per-project ACL) and evaluated on every request, never cached,
/// so a user dropped from a team loses access on their next request.
pub async fn check_project_access(
    pool: &PgPool,
    project_id: i64,
    requester: &AuthUser,
) -> Result<(), AppError> {
    if project_id <= 0 {
        return Err(AppError::BadRequest("project_id requerido".to_string()));
    }

    let Some(team_id) = requester.team_id else {
        return Err(AppError::Forbidden("Sin equipo asignado".to_string()));
    };

    let allowed =
        db::projects::is_accessible(pool, project_id, requester.user_id, team_id).await?;
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Acceso denegado a este proyecto".to_string(),
        ))
    }
}
