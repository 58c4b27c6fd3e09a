use sqlx::PgPool;

use crate::models::WikiPage;

pub async fn create(
    pool: &PgPool,
    project_id: i64,
    title: &str,
    content: &str,
    created_by: i64,
) -> Result<WikiPage, sqlx::Error> {
    sqlx::query_as::<_, WikiPage>(
        "INSERT INTO wiki_pages (project_id, title, content, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $4) RETURNING *",
    )
    .bind(project_id)
    .bind(title)
    .bind(content)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<WikiPage>, sqlx::Error> {
    sqlx::query_as::<_, WikiPage>("SELECT * FROM wiki_pages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_project(
    pool: &PgPool,
    project_id: i64,
) -> Result<Vec<WikiPage>, sqlx::Error> {
    sqlx::query_as::<_, WikiPage>(
        "SELECT * FROM wiki_pages WHERE project_id = $1 ORDER BY title",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    title: &str,
    content: &str,
    updated_by: i64,
) -> Result<WikiPage, sqlx::Error> {
    sqlx::query_as::<_, WikiPage>(
        "UPDATE wiki_pages SET title = $2, content = $3, updated_by = $4, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(updated_by)
    .fetch_one(pool)
    .await
}
