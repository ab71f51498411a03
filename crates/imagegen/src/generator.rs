//! The image acquisition chain.

use moodasset_core::style::{enhance_prompt, Style};
use moodasset_core::types::Timestamp;
use serde::Serialize;

use crate::config::ImageGenConfig;
use crate::openrouter::{ChatParams, OpenRouterClient, PROMPT_MODEL};
use crate::placeholder;
use crate::prompt::rewrite_instruction;
use crate::stock::StockPhotoClient;
use crate::strategy::{
    ChatGuessStrategy, ImageEndpointStrategy, ImageStrategy, StockSearchStrategy,
};

const REWRITE_PARAMS: ChatParams = ChatParams {
    model: PROMPT_MODEL,
    temperature: 0.7,
    max_tokens: 150,
};

/// How an image URL was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetadata {
    /// Name of the strategy that produced the image, or `placeholder`.
    pub source: &'static str,
    pub model: &'static str,
    pub style: Style,
    pub original_prompt: String,
    pub timestamp: Timestamp,
    /// False only when the placeholder was used.
    pub real_image: bool,
}

/// Outcome of a generation run. Always carries an image URL.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub image_url: String,
    /// The prompt the image was acquired with (enhanced and possibly rewritten).
    pub prompt: String,
    pub metadata: GenerationMetadata,
}

/// Runs an ordered list of [`ImageStrategy`] steps and falls back to a
/// deterministic placeholder URL.
pub struct ImageGenerator {
    rewriter: Option<OpenRouterClient>,
    strategies: Vec<Box<dyn ImageStrategy>>,
}

impl ImageGenerator {
    pub fn new(rewriter: Option<OpenRouterClient>, strategies: Vec<Box<dyn ImageStrategy>>) -> Self {
        Self {
            rewriter,
            strategies,
        }
    }

    /// A generator that never touches the network.
    pub fn placeholder_only() -> Self {
        Self::new(None, Vec::new())
    }

    /// Build the chain from configuration. Strategies whose API key is
    /// missing are left out.
    pub fn from_config(config: &ImageGenConfig, client: reqwest::Client) -> Self {
        let openrouter = config.openrouter_api_key.as_ref().map(|key| {
            OpenRouterClient::with_client(
                client.clone(),
                key.clone(),
                config.openrouter_base_url.clone(),
            )
        });

        let mut strategies: Vec<Box<dyn ImageStrategy>> = Vec::new();
        if let Some(openrouter) = &openrouter {
            strategies.push(Box::new(ImageEndpointStrategy::new(openrouter.clone())));
        }
        if let Some(key) = &config.unsplash_access_key {
            let stock = StockPhotoClient::with_client(
                client.clone(),
                key.clone(),
                config.unsplash_base_url.clone(),
            );
            strategies.push(Box::new(StockSearchStrategy::new(stock)));
        }
        if let Some(openrouter) = &openrouter {
            strategies.push(Box::new(ChatGuessStrategy::new(openrouter.clone())));
        }

        Self::new(openrouter, strategies)
    }

    /// Names of the enabled strategies, in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Acquire an image for `prompt` in `style`.
    ///
    /// Never fails: every strategy error is logged and skipped, and the
    /// placeholder URL is used when the chain is exhausted.
    pub async fn generate(&self, prompt: &str, style: Style) -> GenerationResult {
        let enhanced = enhance_prompt(prompt, style);
        let working_prompt = self
            .rewrite(&enhanced)
            .await
            .unwrap_or_else(|| enhanced.clone());
        tracing::debug!(style = %style, prompt = %working_prompt, "Starting image acquisition");

        for strategy in &self.strategies {
            match strategy.acquire(&working_prompt, style).await {
                Ok(image_url) => {
                    tracing::info!(source = strategy.name(), image_url = %image_url, "Image acquired");
                    let origin = Origin {
                        source: strategy.name(),
                        model: strategy.model(),
                        real_image: true,
                    };
                    return build_result(image_url, working_prompt, prompt, style, origin);
                }
                Err(e) => {
                    tracing::warn!(
                        source = strategy.name(),
                        error = %e,
                        "Image strategy failed, trying next"
                    );
                }
            }
        }

        // Seeded on the enhanced prompt, not the rewrite: same input, same URL.
        let image_url = placeholder::placeholder_url(&enhanced, style);
        tracing::info!(image_url = %image_url, "Using placeholder image");
        let origin = Origin {
            source: placeholder::SOURCE,
            model: placeholder::MODEL,
            real_image: false,
        };
        build_result(image_url, working_prompt, prompt, style, origin)
    }

    async fn rewrite(&self, enhanced: &str) -> Option<String> {
        let client = self.rewriter.as_ref()?;
        match client.chat(REWRITE_PARAMS, rewrite_instruction(enhanced)).await {
            Ok(rewritten) => Some(rewritten),
            Err(e) => {
                tracing::warn!(error = %e, "Prompt rewrite failed, keeping enhanced prompt");
                None
            }
        }
    }
}

struct Origin {
    source: &'static str,
    model: &'static str,
    real_image: bool,
}

fn build_result(
    image_url: String,
    working_prompt: String,
    original_prompt: &str,
    style: Style,
    origin: Origin,
) -> GenerationResult {
    GenerationResult {
        image_url,
        prompt: working_prompt,
        metadata: GenerationMetadata {
            source: origin.source,
            model: origin.model,
            style,
            original_prompt: original_prompt.to_string(),
            timestamp: chrono::Utc::now(),
            real_image: origin.real_image,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_builds_empty_chain() {
        let generator =
            ImageGenerator::from_config(&ImageGenConfig::disabled(), reqwest::Client::new());
        assert!(generator.strategy_names().is_empty());
    }

    #[test]
    fn strategies_follow_fixed_order() {
        let config = ImageGenConfig {
            openrouter_api_key: Some("or-key".into()),
            unsplash_access_key: Some("us-key".into()),
            ..ImageGenConfig::disabled()
        };
        let generator = ImageGenerator::from_config(&config, reqwest::Client::new());
        assert_eq!(
            generator.strategy_names(),
            vec!["openrouter-image", "stock-search", "chat-guess"]
        );
    }

    #[test]
    fn stock_only_config() {
        let config = ImageGenConfig {
            unsplash_access_key: Some("us-key".into()),
            ..ImageGenConfig::disabled()
        };
        let generator = ImageGenerator::from_config(&config, reqwest::Client::new());
        assert_eq!(generator.strategy_names(), vec!["stock-search"]);
    }
}
