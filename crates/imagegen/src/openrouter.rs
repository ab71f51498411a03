//! Client for an OpenRouter-compatible API (chat completions and image
//! generations).

use serde::{Deserialize, Serialize};

use crate::error::ImageGenError;

/// Model used to rewrite user prompts into richer image prompts.
pub const PROMPT_MODEL: &str = "anthropic/claude-3.5-sonnet";
/// Model requested from the image generation endpoint.
pub const IMAGE_MODEL: &str = "black-forest-labs/flux-1.1-pro";
/// Model asked to suggest a matching stock-photo URL.
pub const GUESS_MODEL: &str = "openai/gpt-4o";

pub const IMAGE_SIZE: &str = "512x512";

const REFERER: &str = "https://mood-asset-generator.com";
const APP_TITLE: &str = "Mood Asset Generator";

// OpenAI-compatible request/response shapes

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

/// Sampling parameters for a single-message chat completion.
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    pub model: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// HTTP client for the OpenRouter API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a single user message and return the trimmed reply text.
    ///
    /// An empty or missing reply is reported as [`ImageGenError::Empty`].
    pub async fn chat(&self, params: ChatParams, content: String) -> Result<String, ImageGenError> {
        let body = ChatRequest {
            model: params.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .request(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;
        let parsed: ChatResponse = ImageGenError::parse_response(response).await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ImageGenError::Empty("chat completion"))
    }

    /// Request one image for `prompt` and return its URL.
    pub async fn generate_image(&self, model: &str, prompt: &str) -> Result<String, ImageGenError> {
        let body = ImageRequest {
            model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            response_format: "url",
        };

        let response = self
            .request(format!("{}/images/generations", self.base_url))
            .json(&body)
            .send()
            .await?;
        let parsed: ImageResponse = ImageGenError::parse_response(response).await?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .filter(|u| !u.is_empty())
            .ok_or(ImageGenError::Empty("image url"))
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
    }
}
