use sqlx::PgPool;

use crate::models::SearchResult;

/// Escape LIKE metacharacters in user input and wrap it for a contains
/// match. The pattern is always bound, never interpolated.
pub fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub async fn issues_in_project(
    pool: &PgPool,
    project_id: i64,
    pattern: &str,
) -> Result<Vec<SearchResult>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, title FROM issues
         WHERE project_id = $1 AND (title ILIKE $2 OR body ILIKE $2)
         ORDER BY created_at DESC, id DESC",
    )
    .bind(project_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(to_results(rows, "issue"))
}

pub async fn pages_in_project(
    pool: &PgPool,
    project_id: i64,
    pattern: &str,
) -> Result<Vec<SearchResult>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, title FROM wiki_pages
         WHERE project_id = $1 AND (title ILIKE $2 OR content ILIKE $2)
         ORDER BY created_at DESC, id DESC",
    )
    .bind(project_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(to_results(rows, "page"))
}

pub async fn issues_accessible(
    pool: &PgPool,
    user_id: i64,
    team_id: Option<i64>,
    pattern: &str,
) -> Result<Vec<SearchResult>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT i.id, i.title FROM issues i
         JOIN projects p ON p.id = i.project_id
         WHERE (p.created_by = $1
                OR ($2::bigint IS NOT NULL AND p.created_by IN
                    (SELECT user_id FROM team_members WHERE team_id = $2)))
           AND (i.title ILIKE $3 OR i.body ILIKE $3)
         ORDER BY i.created_at DESC, i.id DESC",
    )
    .bind(user_id)
    .bind(team_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(to_results(rows, "issue"))
}

pub async fn pages_accessible(
    pool: &PgPool,
    user_id: i64,
    team_id: Option<i64>,
    pattern: &str,
) -> Result<Vec<SearchResult>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT w.id, w.title FROM wiki_pages w
         JOIN projects p ON p.id = w.project_id
         WHERE (p.created_by = $1
                OR ($2::bigint IS NOT NULL AND p.created_by IN
                    (SELECT user_id FROM team_members WHERE team_id = $2)))
           AND (w.title ILIKE $3 OR w.content ILIKE $3)
         ORDER BY w.created_at DESC, w.id DESC",
    )
    .bind(user_id)
    .bind(team_id)
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(to_results(rows, "page"))
}

fn to_results(rows: Vec<(i64, String)>, kind: &str) -> Vec<SearchResult> {
    rows.into_iter()
        .map(|(id, title)| SearchResult {
            id,
            kind: kind.to_string(),
            title,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("te"), "%te%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }
}
