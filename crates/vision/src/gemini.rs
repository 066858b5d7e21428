//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use slidesnap_core::{Error, Region, Result};

use crate::analyzer::LayoutAnalyzer;
use crate::parse::parse_regions;
use crate::prompt::LAYOUT_PROMPT;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini `generateContent` endpoint.
///
/// One request per image, no retries: a failed page degrades to an empty
/// region list at the call site rather than stalling the whole batch.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the given API key and model name.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::AnalysisError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// The model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

#[async_trait]
impl LayoutAnalyzer for GeminiClient {
    async fn analyze(&self, png: &[u8]) -> Result<Vec<Region>> {
        let request = GenerateContentRequest::for_image(LAYOUT_PROMPT, png);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::AnalysisError(format!("model request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AnalysisError(format!(
                "model request returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::AnalysisError(format!("malformed model response: {e}")))?;

        Ok(parse_regions(&body.text()))
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn for_image(prompt: &'a str, png: &[u8]) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: STANDARD.encode(png),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// All text parts of the first candidate, concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest::for_image("prompt text", &[1, 2, 3]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(
            value["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(
            value["contents"][0]["parts"][1]["inline_data"]["data"],
            STANDARD.encode([1, 2, 3])
        );
        assert_eq!(
            value["generationConfig"]["response_mime_type"],
            "application/json"
        );
    }

    #[test]
    fn test_response_text_concatenates_first_candidate() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [ { "text": "[{" }, { "text": "}]" } ] } },
                    { "content": { "parts": [ { "text": "ignored" } ] } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.text(), "[{}]");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.text(), "");
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new("key", "gemini-2.5-flash").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
