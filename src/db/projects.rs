use sqlx::PgPool;

use crate::models::Project;

pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
    created_by: i64,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (name, description, created_by) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Projects visible to a user: their own, plus those whose creator belongs
/// to the user's team.
pub async fn list_accessible(
    pool: &PgPool,
    user_id: i64,
    team_id: Option<i64>,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects
         WHERE created_by = $1
            OR ($2::bigint IS NOT NULL AND created_by IN
                (SELECT user_id FROM team_members WHERE team_id = $2))
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(team_id)
    .fetch_all(pool)
    .await
}

/// The access rule in one query: the requester created the project, or the
/// creator is a member of the requester's team.
pub async fn is_accessible(
    pool: &PgPool,
    project_id: i64,
    user_id: i64,
    team_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(
             SELECT 1 FROM projects
             WHERE id = $1
               AND (created_by = $2
                    OR created_by IN
                       (SELECT user_id FROM team_members WHERE team_id = $3))
         )",
    )
    .bind(project_id)
    .bind(user_id)
    .bind(team_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
