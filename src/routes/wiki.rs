use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::access::check_project_access;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{EntityKind, NotificationType, WikiPage};
use crate::notify::{self, EntityRef};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreatePage {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
    Json(req): Json<CreatePage>,
) -> Result<Json<WikiPage>, AppError> {
    check_project_access(&state.pool, project_id, &auth).await?;

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Page title is required".to_string()));
    }

    let page = db::wiki_pages::create(
        &state.pool,
        project_id,
        req.title.trim(),
        &req.content,
        auth.user_id,
    )
    .await?;

    if let Some(project) = db::projects::find_by_id(&state.pool, project_id).await? {
        notify::record(
            &state,
            project.created_by,
            NotificationType::PageCreated,
            EntityRef {
                kind: EntityKind::Page,
                id: page.id,
                title: &page.title,
            },
            &auth,
        )
        .await;
    }

    Ok(Json(page))
}

pub async fn list_by_project(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<WikiPage>>, AppError> {
    check_project_access(&state.pool, project_id, &auth).await?;
    let pages = db::wiki_pages::list_by_project(&state.pool, project_id).await?;
    Ok(Json(pages))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<WikiPage>, AppError> {
    let page = db::wiki_pages::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
    check_project_access(&state.pool, page.project_id, &auth).await?;
    Ok(Json(page))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePage>,
) -> Result<Json<WikiPage>, AppError> {
    let page = db::wiki_pages::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
    check_project_access(&state.pool, page.project_id, &auth).await?;

    let title = req.title.unwrap_or_else(|| page.title.clone());
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Page title is required".to_string()));
    }
    let content = req.content.unwrap_or_else(|| page.content.clone());

    let updated =
        db::wiki_pages::update(&state.pool, id, title.trim(), &content, auth.user_id).await?;

    if let Some(project) = db::projects::find_by_id(&state.pool, page.project_id).await? {
        notify::record(
            &state,
            project.created_by,
            NotificationType::PageUpdated,
            EntityRef {
                kind: EntityKind::Page,
                id: updated.id,
                title: &updated.title,
            },
            &auth,
        )
        .await;
    }

    Ok(Json(updated))
}
