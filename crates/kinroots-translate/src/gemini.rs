//! Gemini classifier client

use crate::error::{TranslateError, TranslateResult};
use crate::traits::{DuplicateDetector, KinshipClassifier, KinshipLabel, MatchCandidate};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Request structure for the generateContent API
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

/// Response structure from the generateContent API
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini-backed text classifier
///
/// One request per call, structured-JSON responses, bounded timeout, no
/// retries. Callers own the degradation policy.
pub struct GeminiClassifier {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClassifier {
    pub fn new(api_key: impl Into<String>) -> TranslateResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(TranslateError::MissingApiKey);
        }
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Single structured-output generation call
    async fn generate_json(&self, prompt: String, schema: Value) -> TranslateResult<Value> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateResponse = response.json().await?;
        let text = result
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| TranslateError::MalformedResponse("no candidates".to_string()))?;

        serde_json::from_str(text)
            .map_err(|e| TranslateError::MalformedResponse(format!("invalid JSON payload: {}", e)))
    }
}

#[async_trait]
impl KinshipClassifier for GeminiClassifier {
    async fn classify(&self, prompt: &str) -> TranslateResult<KinshipLabel> {
        let instruction = format!(
            "You are an expert in Indian genealogy and kinship terms. \
             Given a family relationship path: \"{}\", \
             identify the specific North Indian (Hindi-based) kinship term \
             (e.g., Chacha, Tau, Mama, Bua, Nanad, etc.). \
             Explain briefly why it's used. Return JSON.",
            prompt
        );
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "term": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            },
            "required": ["term", "explanation"]
        });

        let value = self.generate_json(instruction, schema).await?;
        serde_json::from_value(value)
            .map_err(|e| TranslateError::MalformedResponse(format!("not a kinship label: {}", e)))
    }
}

#[async_trait]
impl DuplicateDetector for GeminiClassifier {
    async fn detect(&self, prompt: &str) -> TranslateResult<MatchCandidate> {
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "matchId": { "type": "STRING" },
                "confidence": { "type": "NUMBER" }
            },
            "required": ["matchId", "confidence"]
        });

        let value = self.generate_json(prompt.to_string(), schema).await?;
        serde_json::from_value(value)
            .map_err(|e| TranslateError::MalformedResponse(format!("not a match result: {}", e)))
    }
}
