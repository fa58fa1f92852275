//! Google Translate client (public `translate_a/single` endpoint).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{TranslateError, Translator};

/// Translator backed by the keyless Google Translate endpoint.
///
/// Source language is auto-detected; only the target tag is sent.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    http: reqwest::Client,
    endpoint: Url,
}

impl GoogleTranslator {
    /// Create a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, TranslateError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, to: &str) -> Result<String, TranslateError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status));
        }

        let body: Value = response.json().await?;
        let translated = parse_translation(&body)?;
        debug!("Translated {} chars into '{}'", text.len(), to);
        Ok(translated)
    }
}

/// Join the translated sentence chunks of a `translate_a/single` response.
///
/// The body looks like `[[["Hola ", "Hello ", ...], ["mundo", "world", ...]], null, "en", ...]`.
fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing sentence list".into()))?;

    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(TranslateError::Malformed("empty translation".into()));
    }

    Ok(text)
}
