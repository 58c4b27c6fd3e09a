use sqlx::PgPool;

use crate::models::Issue;

pub async fn create(
    pool: &PgPool,
    project_id: i64,
    title: &str,
    body: &str,
    created_by: i64,
    assigned_to: Option<i64>,
) -> Result<Issue, sqlx::Error> {
    sqlx::query_as::<_, Issue>(
        "INSERT INTO issues (project_id, title, body, created_by, assigned_to)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(project_id)
    .bind(title)
    .bind(body)
    .bind(created_by)
    .bind(assigned_to)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Issue>, sqlx::Error> {
    sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_project(pool: &PgPool, project_id: i64) -> Result<Vec<Issue>, sqlx::Error> {
    sqlx::query_as::<_, Issue>(
        "SELECT * FROM issues WHERE project_id = $1 ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    title: &str,
    body: &str,
    status: &str,
    assigned_to: Option<i64>,
) -> Result<Issue, sqlx::Error> {
    sqlx::query_as::<_, Issue>(
        "UPDATE issues SET title = $2, body = $3, status = $4, assigned_to = $5,
                updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(status)
    .bind(assigned_to)
    .fetch_one(pool)
    .await
}
