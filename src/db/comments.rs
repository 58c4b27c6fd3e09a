use sqlx::PgPool;

use crate::models::Comment;

pub async fn create(
    pool: &PgPool,
    issue_id: i64,
    body: &str,
    created_by: i64,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (issue_id, body, created_by) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(issue_id)
    .bind(body)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn list_by_issue(pool: &PgPool, issue_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE issue_id = $1 ORDER BY created_at",
    )
    .bind(issue_id)
    .fetch_all(pool)
    .await
}
