//! Prompt text helpers: rewrite instructions, keyword extraction and
//! stock-URL extraction from chat replies.

use std::sync::LazyLock;

use moodasset_core::style::Style;
use regex::Regex;

/// Maximum length of a stock-search keyword query.
const MAX_KEYWORDS_LEN: usize = 40;
/// Words of this length or shorter are skipped as keywords.
const MIN_KEYWORD_LEN: usize = 3;
const MAX_KEYWORDS: usize = 3;

static STOCK_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https://images\.unsplash\.com/\S+").expect("valid regex")
});

/// Instruction asking a chat model to turn `prompt` into an image prompt.
pub fn rewrite_instruction(prompt: &str) -> String {
    format!(
        "Create a detailed, artistic image generation prompt based on: \"{prompt}\". \
         Make it vivid, specific, and suitable for AI image generation. Include artistic \
         details, composition, lighting, and visual elements. Keep it under 100 words and \
         focused on visual description."
    )
}

/// Instruction asking a chat model to suggest a matching stock-photo URL.
pub fn stock_guess_instruction(prompt: &str, style: Style) -> String {
    format!(
        "I need you to help me create a visual representation. Based on this prompt: \
         \"{prompt}\", style: \"{style}\", please provide a detailed URL for a royalty-free \
         image that matches this description. Use this format: \
         https://images.unsplash.com/photo-[ID]?auto=format&fit=crop&w=512&q=80. Replace \
         [ID] with a realistic photo ID that would match the prompt."
    )
}

/// Pick a short search query from a prompt.
///
/// Takes the first three words longer than three characters. Queries longer
/// than 40 characters are cut to 37 and suffixed with `...`.
pub fn extract_visual_keywords(prompt: &str) -> String {
    let keywords = prompt
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .take(MAX_KEYWORDS)
        .collect::<Vec<_>>()
        .join(" ");

    if keywords.chars().count() > MAX_KEYWORDS_LEN {
        let head: String = keywords.chars().take(MAX_KEYWORDS_LEN - 3).collect();
        format!("{head}...")
    } else {
        keywords
    }
}

/// Return the first stock-photo URL found in free text.
pub fn extract_stock_url(text: &str) -> Option<&str> {
    STOCK_URL_RE.find(text).map(|m| m.as_str())
}
