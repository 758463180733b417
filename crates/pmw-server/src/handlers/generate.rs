//! Generation proxy endpoint.
//!
//! Forwards a caller-built prompt to the configured text-generation
//! upstream and returns the completion. Prompt templates live in the
//! SPA; this endpoint only owns transport, retry, and (for structured
//! generations) payload parsing.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pmw_upstream::{Generator, UpstreamError, complete_json};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Expected completion shape.
#[derive(Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum GenerateFormat {
    /// Return the completion verbatim.
    #[default]
    Text,
    /// Parse the completion as JSON (retrying when it does not parse).
    Json,
}

/// Request for POST /api/generate.
#[derive(Deserialize)]
pub(crate) struct GenerateRequest {
    /// Prompt to forward to the upstream.
    prompt: String,
    /// Expected completion shape.
    #[serde(default)]
    format: GenerateFormat,
}

/// Response for POST /api/generate.
#[derive(Serialize, Debug)]
pub(crate) struct GenerateResponse {
    /// Completion text (format = "text").
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Parsed completion payload (format = "json").
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

/// Handle POST /api/generate.
pub(crate) async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ServerError> {
    if request.prompt.trim().is_empty() {
        return Err(ServerError::Validation("prompt must not be empty".to_owned()));
    }

    let generator = state
        .generator
        .as_ref()
        .map(Arc::clone)
        .ok_or(ServerError::UpstreamUnavailable)?;
    let policy = state.retry.clone();
    let prompt = request.prompt;
    let format = request.format;

    // ureq is blocking; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || run_generation(&*generator, &prompt, format, &policy))
        .await
        .map_err(|e| ServerError::Internal(format!("generation task failed: {e}")))??;

    Ok(Json(response))
}

/// Issue the upstream call under the retry policy.
fn run_generation(
    generator: &dyn Generator,
    prompt: &str,
    format: GenerateFormat,
    policy: &pmw_retry::RetryPolicy,
) -> Result<GenerateResponse, UpstreamError> {
    match format {
        GenerateFormat::Text => {
            let text = policy.run(|| generator.complete(prompt), UpstreamError::is_retryable)?;
            Ok(GenerateResponse {
                text: Some(text),
                data: None,
            })
        }
        GenerateFormat::Json => {
            let data = complete_json(generator, prompt, policy)?;
            Ok(GenerateResponse {
                text: None,
                data: Some(data),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pmw_retry::RetryPolicy;
    use pmw_store::MemoryStore;
    use pmw_upstream::MockGenerator;
    use pretty_assertions::assert_eq;

    use super::*;

    fn state_with_generator(generator: Option<MockGenerator>) -> Arc<AppState> {
        Arc::new(AppState {
            store: Arc::new(MemoryStore::new()),
            generator: generator.map(|g| Arc::new(g) as Arc<dyn Generator>),
            retry: RetryPolicy::without_delay(3),
            version: "0.0.0-test".to_owned(),
        })
    }

    fn request(prompt: &str, format: GenerateFormat) -> Json<GenerateRequest> {
        Json(GenerateRequest {
            prompt: prompt.to_owned(),
            format,
        })
    }

    #[tokio::test]
    async fn test_generate_proxies_completion() {
        let state = state_with_generator(Some(MockGenerator::new().with_response("a brief")));
        let Json(response) = generate(State(state), request("write a brief", GenerateFormat::Text))
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some("a brief"));
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_generate_retries_transient_failures() {
        let generator = MockGenerator::new()
            .with_error(UpstreamError::Status {
                status: 503,
                body: "warming up".to_owned(),
            })
            .with_response("recovered");
        let state = state_with_generator(Some(generator));

        let Json(response) = generate(State(state), request("p", GenerateFormat::Text))
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some("recovered"));
    }

    #[tokio::test]
    async fn test_generate_json_parses_fenced_payload() {
        let generator =
            MockGenerator::new().with_response("```json\n{\"sections\": [\"goal\"]}\n```");
        let state = state_with_generator(Some(generator));

        let Json(response) = generate(State(state), request("brief json", GenerateFormat::Json))
            .await
            .unwrap();
        assert_eq!(
            response.data,
            Some(serde_json::json!({"sections": ["goal"]}))
        );
        assert!(response.text.is_none());
    }

    #[tokio::test]
    async fn test_generate_json_retries_unparseable_payload() {
        let generator = MockGenerator::new()
            .with_response("Sure! Here is the JSON you asked for:")
            .with_response("{\"ok\": true}");
        let state = state_with_generator(Some(generator));

        let Json(response) = generate(State(state), request("p", GenerateFormat::Json))
            .await
            .unwrap();
        assert_eq!(response.data, Some(serde_json::json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_generate_without_upstream_is_unavailable() {
        let state = state_with_generator(None);
        let err = generate(State(state), request("p", GenerateFormat::Text))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::UpstreamUnavailable));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_prompt() {
        let state = state_with_generator(Some(MockGenerator::new()));
        let err = generate(State(state), request("   ", GenerateFormat::Text))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Validation(_)));
    }
}
