//! Generator trait and HTTP implementation.

use std::time::Duration;

use pmw_retry::RetryPolicy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::UpstreamError;

/// Default HTTP timeout in seconds.
///
/// Generation calls are slow; this is deliberately generous compared
/// to ordinary API timeouts.
const DEFAULT_TIMEOUT: u64 = 60;

/// Text-generation upstream: prompt in, completion text out.
pub trait Generator: Send + Sync {
    /// Request a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failures or error
    /// statuses from the upstream.
    fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Request body sent to the upstream.
#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}

/// Response body expected from the upstream.
#[derive(serde::Deserialize)]
struct CompletionResponse {
    text: String,
}

/// HTTP client for the generation endpoint.
pub struct HttpGenerator {
    agent: Agent,
    url: String,
    token: Option<String>,
}

impl HttpGenerator {
    /// Create a client for the given endpoint URL.
    ///
    /// `token`, when present, is sent as a bearer token.
    #[must_use]
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            url: url.into(),
            token,
        }
    }
}

impl Generator for HttpGenerator {
    fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        tracing::debug!(url = %self.url, prompt_len = prompt.len(), "Requesting completion");

        let mut request = self
            .agent
            .post(&self.url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request.send_json(CompletionRequest { prompt })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(UpstreamError::Status {
                status,
                body: error_body,
            });
        }

        let completion: CompletionResponse = body_reader.read_json()?;
        Ok(completion.text)
    }
}

/// Strip a surrounding Markdown code fence from a completion.
///
/// Models frequently wrap requested JSON in ```` ```json ... ``` ````.
/// Returns the inner body trimmed; input without a fence is returned
/// trimmed and otherwise unchanged.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

/// Request a completion and parse it as JSON, retrying under `policy`.
///
/// Each attempt issues a fresh completion request; a payload that does
/// not parse counts as a retryable failure, since re-prompting often
/// yields parseable output.
///
/// # Errors
///
/// Returns the last [`UpstreamError`] once the policy gives up.
pub fn complete_json<T: DeserializeOwned>(
    generator: &dyn Generator,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<T, UpstreamError> {
    policy.run(
        || {
            let raw = generator.complete(prompt)?;
            serde_json::from_str(strip_code_fence(&raw)).map_err(UpstreamError::from)
        },
        UpstreamError::is_retryable,
    )
}
