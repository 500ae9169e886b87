use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use salescope_core::config::LlmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::LlmClient;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("gemini api key is not configured")]
    MissingApiKey,
    #[error("could not build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("gemini request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("gemini returned status {0}")]
    Status(StatusCode),
    #[error("gemini response contained no candidate text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// REST client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, GeminiError> {
        let api_key = config.api_key.clone().ok_or(GeminiError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(GeminiError::ClientBuild)?;

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, parts: &[&str]) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: parts.iter().map(|&text| RequestPart { text }).collect(),
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(GeminiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Status(status).into());
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(GeminiError::Request)?;
        let text = candidate_text(&body).ok_or(GeminiError::EmptyResponse)?;
        Ok(text)
    }
}

fn candidate_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    if content.parts.is_empty() {
        return None;
    }
    Some(content.parts.iter().map(|part| part.text.as_str()).collect::<Vec<_>>().join(""))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{candidate_text, GenerateContentResponse};

    fn response(raw: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(raw).expect("response fixture")
    }

    #[test]
    fn concatenates_candidate_parts() {
        let body = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}]}
            }]
        }));
        assert_eq!(candidate_text(&body).as_deref(), Some("Hello world"));
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert!(candidate_text(&response(json!({}))).is_none());
        assert!(candidate_text(&response(json!({"candidates": []}))).is_none());
        assert!(candidate_text(&response(json!({"candidates": [{}]}))).is_none());
        assert!(candidate_text(&response(json!({"candidates": [{"content": {"parts": []}}]})))
            .is_none());
    }
}
