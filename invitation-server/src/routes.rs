use asset_registry::{GalleryCounts, ImageEntry};
use axum::{extract::State, Json};
use invitation_core::site::SiteContent;
use serde::Serialize;

use crate::{error::AppError, state::AppState, upstream};

#[derive(Serialize)]
pub struct GalleryResponse {
    pub images: Vec<ImageEntry>,
    pub counts: GalleryCounts,
}

#[derive(Serialize)]
pub struct SiteResponse {
    #[serde(flatten)]
    pub content: SiteContent,
    pub hashtag: String,
}

pub async fn gallery_handler(State(state): State<AppState>) -> Result<Json<GalleryResponse>, AppError> {
    let root = state.config.public_dir.clone();
    let scan = tokio::task::spawn_blocking(move || asset_registry::scan(&root))
        .await
        .map_err(|e| AppError::Internal(format!("gallery scan aborted: {e}")))?;

    let counts = scan.counts();
    Ok(Json(GalleryResponse {
        images: scan.images,
        counts,
    }))
}

pub async fn messages_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let url = state
        .config
        .messages_upstream
        .as_deref()
        .ok_or(AppError::UpstreamNotConfigured)?;
    let body = upstream::fetch_messages(&state.http, url).await?;
    Ok(Json(body))
}

pub async fn site_handler(State(state): State<AppState>) -> Json<SiteResponse> {
    Json(SiteResponse {
        content: (*state.site).clone(),
        hashtag: state.site.couple.hashtag(),
    })
}

pub async fn health_handler() -> &'static str {
    "ok"
}
