use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::{Html, IntoResponse},
};
use invitation_core::supervisor::{describe_panic, FALLBACK};

/// Full-page reload prompt shown when a request handler panics.
pub fn fallback_html() -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body class="fallback">
  <main>
    <h2>{title}</h2>
    <p>{body}</p>
    <button type="button" onclick="window.location.reload()">{action}</button>
  </main>
</body>
</html>
"#,
        title = escape(FALLBACK.title),
        body = escape(FALLBACK.body),
        action = escape(FALLBACK.action),
    )
}

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    tracing::warn!(detail = %describe_panic(panic.as_ref()), "request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_html())).into_response()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_page_offers_a_reload() {
        let html = fallback_html();
        assert!(html.contains(FALLBACK.title));
        assert!(html.contains("Don&#39;t worry"));
        assert!(html.contains("window.location.reload()"));
    }

    #[test]
    fn markup_in_copy_is_escaped() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert!(!fallback_html().contains("Don't"));
    }
}
