use invitation_core::messages::{self, FetchError};
use invitation_core::site::SiteContent;
use invitation_core::supervisor::FALLBACK;
use invitation_core::viewport::Viewport;
use invitation_core::GalleryScan;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

const MESSAGES_URL: &str = "/api/messages";
const GALLERY_URL: &str = "/api/gallery";
const SITE_URL: &str = "/api/site";

fn transport(e: JsValue) -> FetchError {
    FetchError::Transport(format!("{e:?}"))
}

/// GETs `url` with every cache layer bypassed.
async fn fetch_response(url: &str) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Transport("window not available".into()))?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
    request
        .headers()
        .set("Cache-Control", "no-cache")
        .map_err(transport)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let response: Response = value.dyn_into().map_err(transport)?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    Ok(response)
}

async fn fetch_json(url: &str) -> Result<serde_json::Value, FetchError> {
    let response = fetch_response(url).await?;
    let body = JsFuture::from(response.json().map_err(transport)?)
        .await
        .map_err(|e| FetchError::Decode(format!("{e:?}")))?;
    serde_wasm_bindgen::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}

async fn fetch_as<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let value = fetch_json(url).await?;
    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

// Read as text so a non-JSON body (an upstream error page) maps to a decode
// error through the shared parser.
pub async fn fetch_messages() -> Result<serde_json::Value, FetchError> {
    let response = fetch_response(MESSAGES_URL).await?;
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();
    messages::parse_body(&text)
}

pub async fn fetch_gallery() -> Result<GalleryScan, FetchError> {
    fetch_as(GALLERY_URL).await
}

pub async fn fetch_site() -> Result<SiteContent, FetchError> {
    fetch_as(SITE_URL).await
}

pub fn viewport() -> Viewport {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(Viewport::from_width)
        .unwrap_or_default()
}

/// Replaces the page with the reload prompt without going through leptos,
/// for when the runtime can no longer render.
pub fn show_static_fallback() {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    body.set_inner_html(&format!(
        r#"<div class="fallback"><div class="fallback-card"><h2>{}</h2><p>{}</p><button onclick="window.location.reload()">{}</button></div></div>"#,
        FALLBACK.title, FALLBACK.body, FALLBACK.action
    ));
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
