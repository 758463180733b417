//! Fragment rendering endpoint.
//!
//! Converts workbench Markdown into an HTML fragment for the SPA to
//! inject. The renderer is total, so this handler cannot fail.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Request for POST /api/render.
#[derive(Deserialize)]
pub(crate) struct RenderRequest {
    /// Markdown-subset source text.
    markdown: String,
}

/// Response for POST /api/render.
#[derive(Serialize)]
pub(crate) struct RenderResponse {
    /// HTML fragment for direct injection into a container element.
    html: String,
}

/// Handle POST /api/render.
pub(crate) async fn render_fragment(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: pmw_renderer::render(&request.markdown),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_returns_fragment() {
        let Json(response) = render_fragment(Json(RenderRequest {
            markdown: "# Title\n\n- **a**".to_owned(),
        }))
        .await;

        assert!(response.html.starts_with("<h1"));
        assert!(response.html.contains("<li><strong>a</strong></li>"));
    }

    #[tokio::test]
    async fn test_render_empty_document() {
        let Json(response) = render_fragment(Json(RenderRequest {
            markdown: String::new(),
        }))
        .await;
        assert_eq!(response.html, "");
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_value(RenderResponse {
            html: "<p>x</p>".to_owned(),
        })
        .unwrap();
        assert_eq!(json["html"], "<p>x</p>");
    }
}
