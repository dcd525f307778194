//! Google Gemini commentary provider.
//!
//! Calls the Gemini `generateContent` endpoint. Auth via URL query param.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skycast_core::{config::GeminiConfig, error::SkycastError, traits::Commentator};
use tracing::{debug, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API commentator.
pub struct GeminiCommentator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCommentator {
    /// Create from config values.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API host (proxies, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Build the meteorologist prompt for one city's commentary.
///
/// The response structure (overview, analysis, impact, clothing, safety)
/// is part of the product: reports are expected to read like a short
/// professional forecast, not free-form chat.
pub fn build_prompt(city: &str, weather_line: &str, language: &str) -> String {
    format!(
        "Comment on the weather in {city}, which is as follows: {weather_line}. \
         Respond in {language}.\n\
         You are a highly skilled meteorologist and weather analyst. Your task is to \
         provide detailed and insightful weather reports based on the given data. You \
         should analyze temperature, humidity, wind speed, precipitation, and other \
         relevant factors to deliver an accurate and professional weather forecast.\n\
         In your response, follow this structure:\n\
         Weather Overview: Start with a general summary of the weather, including \
         temperature, wind conditions, and the chance of rain or snow.\n\
         Detailed Analysis: Explain weather patterns such as high or low-pressure \
         systems, expected changes, and how the current conditions might evolve \
         throughout the day.\n\
         Impact on Daily Life: Suggest how the weather may affect outdoor activities, \
         commuting, and overall comfort.\n\
         Clothing Recommendations: Based on the weather conditions, recommend \
         appropriate attire, such as wearing light clothing for hot weather, layering \
         for cold conditions, or carrying an umbrella for rainy days.\n\
         Safety Tips: If extreme weather is expected (e.g., storms, heatwaves, \
         snowfall), offer useful precautions and advice.\n\
         Be friendly with the user.\n\
         Your tone should be informative yet engaging, making it easy for users to \
         understand and prepare for the day. Be precise, avoid unnecessary repetition, \
         and ensure clarity in your explanations.\n\
         You should respond in {language}."
    )
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[async_trait]
impl Commentator for GeminiCommentator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn comment(
        &self,
        city: &str,
        weather_line: &str,
        language: &str,
    ) -> Result<String, SkycastError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: build_prompt(city, weather_line, language),
                }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        debug!("gemini: POST models/{}:generateContent", self.model);

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SkycastError::Provider(format!("gemini request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(SkycastError::Provider(format!(
                "gemini returned {status}: {text}"
            )));
        }

        let parsed: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| SkycastError::Provider(format!("gemini: failed to parse response: {e}")))?;

        parsed
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| SkycastError::Provider("gemini response contained no text".to_string()))
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("gemini: no API key configured");
            return false;
        }
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("gemini not available: {e}");
                false
            }
        }
    }
}
