//! Fallible image acquisition strategies, tried in order by the generator.

use async_trait::async_trait;
use moodasset_core::style::Style;
use rand::Rng;

use crate::error::ImageGenError;
use crate::openrouter::{ChatParams, OpenRouterClient, GUESS_MODEL, IMAGE_MODEL};
use crate::prompt::{extract_stock_url, extract_visual_keywords, stock_guess_instruction};
use crate::stock::StockPhotoClient;

/// Only the top results of a stock search are considered for the pick.
const STOCK_PICK_WINDOW: usize = 5;

const GUESS_PARAMS: ChatParams = ChatParams {
    model: GUESS_MODEL,
    temperature: 0.3,
    max_tokens: 150,
};

/// One step of the image acquisition chain.
///
/// A strategy either returns an image URL or an error; errors are logged by
/// the generator and the next strategy is tried.
#[async_trait]
pub trait ImageStrategy: Send + Sync {
    /// Short identifier recorded as the image `source`.
    fn name(&self) -> &'static str;

    /// Model or service recorded alongside the image.
    fn model(&self) -> &'static str;

    async fn acquire(&self, prompt: &str, style: Style) -> Result<String, ImageGenError>;
}

// ---------------------------------------------------------------------------
// AI image endpoint
// ---------------------------------------------------------------------------

/// Generates an image through the `/images/generations` endpoint.
pub struct ImageEndpointStrategy {
    client: OpenRouterClient,
}

impl ImageEndpointStrategy {
    pub fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageStrategy for ImageEndpointStrategy {
    fn name(&self) -> &'static str {
        "openrouter-image"
    }

    fn model(&self) -> &'static str {
        IMAGE_MODEL
    }

    async fn acquire(&self, prompt: &str, _style: Style) -> Result<String, ImageGenError> {
        self.client.generate_image(IMAGE_MODEL, prompt).await
    }
}

// ---------------------------------------------------------------------------
// Stock-photo keyword search
// ---------------------------------------------------------------------------

/// Searches stock photos by keywords taken from the prompt.
pub struct StockSearchStrategy {
    client: StockPhotoClient,
}

impl StockSearchStrategy {
    pub fn new(client: StockPhotoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageStrategy for StockSearchStrategy {
    fn name(&self) -> &'static str {
        "stock-search"
    }

    fn model(&self) -> &'static str {
        "unsplash"
    }

    async fn acquire(&self, prompt: &str, _style: Style) -> Result<String, ImageGenError> {
        let keywords = extract_visual_keywords(prompt);
        if keywords.is_empty() {
            return Err(ImageGenError::Empty("search keywords"));
        }
        tracing::debug!(keywords = %keywords, "Searching stock photos");

        let urls = self.client.search(&keywords).await?;
        pick_one(&urls, STOCK_PICK_WINDOW).ok_or(ImageGenError::Empty("stock photo results"))
    }
}

/// Pick a random entry among the first `window` items.
fn pick_one(items: &[String], window: usize) -> Option<String> {
    let bound = items.len().min(window);
    if bound == 0 {
        return None;
    }
    let index = rand::rng().random_range(0..bound);
    items.get(index).cloned()
}

// ---------------------------------------------------------------------------
// Chat-guessed stock URL
// ---------------------------------------------------------------------------

/// Asks a chat model for a matching stock-photo URL and extracts it.
pub struct ChatGuessStrategy {
    client: OpenRouterClient,
}

impl ChatGuessStrategy {
    pub fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageStrategy for ChatGuessStrategy {
    fn name(&self) -> &'static str {
        "chat-guess"
    }

    fn model(&self) -> &'static str {
        GUESS_MODEL
    }

    async fn acquire(&self, prompt: &str, style: Style) -> Result<String, ImageGenError> {
        let reply = self
            .client
            .chat(GUESS_PARAMS, stock_guess_instruction(prompt, style))
            .await?;
        extract_stock_url(&reply)
            .map(str::to_string)
            .ok_or(ImageGenError::Empty("stock url in chat reply"))
    }
}
