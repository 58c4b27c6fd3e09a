use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::access::check_project_access;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::SearchResult;
use crate::state::SharedState;

/// Queries below this length never touch storage. The client debounces too,
/// but the service enforces it on its own.
const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub project_id: Option<i64>,
}

pub async fn search(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let query = params.q.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Json(json!({ "results": [] })));
    }

    let pattern = db::search::contains_pattern(query);

    // Issues first, then pages; each side is already newest-first, so the
    // combined order is deterministic.
    let mut results: Vec<SearchResult> = match params.project_id {
        Some(project_id) => {
            check_project_access(&state.pool, project_id, &auth).await?;
            db::search::issues_in_project(&state.pool, project_id, &pattern).await?
        }
        None => {
            db::search::issues_accessible(&state.pool, auth.user_id, auth.team_id, &pattern)
                .await?
        }
    };

    let pages = match params.project_id {
        Some(project_id) => {
            db::search::pages_in_project(&state.pool, project_id, &pattern).await?
        }
        None => {
            db::search::pages_accessible(&state.pool, auth.user_id, auth.team_id, &pattern)
                .await?
        }
    };
    results.extend(pages);

    Ok(Json(json!({ "results": results })))
}
