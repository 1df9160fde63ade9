use axum::http::header::CACHE_CONTROL;

use crate::error::AppError;

/// Fetches the guest message collection, bypassing any intermediate cache.
/// The body is passed on as-is; clients decode it defensively.
pub async fn fetch_messages(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, AppError> {
    let response = client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "messages upstream returned an error");
        return Err(AppError::UpstreamStatus(status.as_u16()));
    }

    Ok(response.json().await?)
}
