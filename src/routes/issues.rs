use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::access::check_project_access;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Comment, EntityKind, Issue, NotificationType};
use crate::notify::{self, EntityRef};
use crate::state::SharedState;

const STATUSES: [&str; 3] = ["open", "in_progress", "done"];

#[derive(Deserialize)]
pub struct CreateIssue {
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub assigned_to: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateIssue {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateComment {
    pub body: String,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
    Json(req): Json<CreateIssue>,
) -> Result<Json<Issue>, AppError> {
    check_project_access(&state.pool, project_id, &auth).await?;

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Issue title is required".to_string()));
    }

    let issue = db::issues::create(
        &state.pool,
        project_id,
        req.title.trim(),
        &req.body,
        auth.user_id,
        req.assigned_to,
    )
    .await?;

    let entity = EntityRef {
        kind: EntityKind::Issue,
        id: issue.id,
        title: &issue.title,
    };

    if let Some(project) = db::projects::find_by_id(&state.pool, project_id).await? {
        notify::record(
            &state,
            project.created_by,
            NotificationType::IssueCreated,
            entity,
            &auth,
        )
        .await;
    }
    if let Some(assignee) = issue.assigned_to {
        notify::record(
            &state,
            assignee,
            NotificationType::IssueAssigned,
            entity,
            &auth,
        )
        .await;
    }

    Ok(Json(issue))
}

pub async fn list_by_project(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Issue>>, AppError> {
    check_project_access(&state.pool, project_id, &auth).await?;
    let issues = db::issues::list_by_project(&state.pool, project_id).await?;
    Ok(Json(issues))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Issue>, AppError> {
    let issue = db::issues::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;
    check_project_access(&state.pool, issue.project_id, &auth).await?;
    Ok(Json(issue))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateIssue>,
) -> Result<Json<Issue>, AppError> {
    let issue = db::issues::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;
    check_project_access(&state.pool, issue.project_id, &auth).await?;

    let status = req.status.unwrap_or_else(|| issue.status.clone());
    if !STATUSES.contains(&status.as_str()) {
        return Err(AppError::BadRequest(format!("Unknown status: {status}")));
    }

    let title = req.title.unwrap_or_else(|| issue.title.clone());
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Issue title is required".to_string()));
    }
    let body = req.body.unwrap_or_else(|| issue.body.clone());
    let assigned_to = req.assigned_to.or(issue.assigned_to);

    let updated =
        db::issues::update(&state.pool, id, title.trim(), &body, &status, assigned_to).await?;

    let entity = EntityRef {
        kind: EntityKind::Issue,
        id: updated.id,
        title: &updated.title,
    };

    let mut recipients = vec![issue.created_by];
    if let Some(project) = db::projects::find_by_id(&state.pool, issue.project_id).await? {
        recipients.push(project.created_by);
    }
    if let Some(previous) = issue.assigned_to {
        recipients.push(previous);
    }
    notify::record_all(
        &state,
        recipients,
        NotificationType::IssueUpdated,
        entity,
        &auth,
    )
    .await;

    // A fresh assignee gets the assignment notice instead of a generic update.
    if let Some(assignee) = updated.assigned_to {
        if issue.assigned_to != Some(assignee) {
            notify::record(
                &state,
                assignee,
                NotificationType::IssueAssigned,
                entity,
                &auth,
            )
            .await;
        }
    }

    Ok(Json(updated))
}

pub async fn list_comments(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let issue = db::issues::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;
    check_project_access(&state.pool, issue.project_id, &auth).await?;

    let comments = db::comments::list_by_issue(&state.pool, id).await?;
    Ok(Json(comments))
}

pub async fn add_comment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<CreateComment>,
) -> Result<Json<Comment>, AppError> {
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Comment body is required".to_string()));
    }

    let issue = db::issues::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;
    check_project_access(&state.pool, issue.project_id, &auth).await?;

    let comment = db::comments::create(&state.pool, id, &req.body, auth.user_id).await?;

    let entity = EntityRef {
        kind: EntityKind::Comment,
        id: comment.id,
        title: &issue.title,
    };

    // Mentioned teammates get a mention; everyone else involved with the
    // issue gets the plain comment notice.
    let mut mentioned = Vec::new();
    if let Some(team_id) = auth.team_id {
        for name in notify::extract_mentions(&req.body) {
            if let Some(user) =
                db::users::find_by_name_in_team(&state.pool, &name, team_id).await?
            {
                mentioned.push(user.id);
            }
        }
    }
    notify::record_all(
        &state,
        mentioned.iter().copied(),
        NotificationType::Mention,
        entity,
        &auth,
    )
    .await;

    let recipients: Vec<i64> = [Some(issue.created_by), issue.assigned_to]
        .into_iter()
        .flatten()
        .filter(|id| !mentioned.contains(id))
        .collect();
    notify::record_all(
        &state,
        recipients,
        NotificationType::CommentAdded,
        entity,
        &auth,
    )
    .await;

    Ok(Json(comment))
}
