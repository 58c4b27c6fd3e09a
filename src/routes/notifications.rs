use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Read-side action selector. A string the enum does not know is a
/// deserialization failure, not a silent fallthrough.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedAction {
    UnreadCount,
    List,
}

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub action: FeedAction,
    pub limit: Option<i64>,
}

/// Write-side commands, tagged on the same `action` key the widgets send.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NotificationCommand {
    MarkRead { id: i64 },
    MarkAllRead,
}

pub async fn feed(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Value>, AppError> {
    match params.action {
        FeedAction::UnreadCount => {
            let count = db::notifications::unread_count(&state.pool, auth.user_id).await?;
            Ok(Json(json!({ "count": count })))
        }
        FeedAction::List => {
            let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
            let notifications =
                db::notifications::list(&state.pool, auth.user_id, limit).await?;
            Ok(Json(json!({ "data": notifications })))
        }
    }
}

pub async fn mutate(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(command): Json<NotificationCommand>,
) -> Result<Json<Value>, AppError> {
    match command {
        NotificationCommand::MarkRead { id } => {
            db::notifications::mark_read(&state.pool, id, auth.user_id).await?;
        }
        NotificationCommand::MarkAllRead => {
            db::notifications::mark_all_read(&state.pool, auth.user_id).await?;
        }
    }
    Ok(Json(json!({ "success": true })))
}
