//! Deterministic, network-free placeholder image URLs.

use moodasset_core::style::Style;

/// Source name recorded for placeholder images.
pub const SOURCE: &str = "placeholder";
/// Model name recorded for placeholder images.
pub const MODEL: &str = "style-placeholder";

const BASE_URL: &str = "https://picsum.photos/id";
const SIZE: &str = "512/512";

/// Seed derived from a prompt.
///
/// A 32-bit wrapping `h * 31 + unit` hash over the prompt's UTF-16 code
/// units, returned as its absolute value.
pub fn prompt_seed(prompt: &str) -> u64 {
    let hash = prompt
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    i64::from(hash).unsigned_abs()
}

/// Placeholder image URL for a prompt in a style. Same inputs, same URL.
pub fn placeholder_url(prompt: &str, style: Style) -> String {
    let config = style.placeholder();
    let id = prompt_seed(prompt) % config.modulus + config.offset;
    format!("{BASE_URL}/{id}/{SIZE}{}", config.filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_string_hash() {
        assert_eq!(prompt_seed(""), 0);
        assert_eq!(prompt_seed("a"), 97);
        assert_eq!(prompt_seed("ab"), 97 * 31 + 98);
    }

    #[test]
    fn seed_is_absolute_value_on_overflow() {
        // Long input wraps the 32-bit accumulator.
        let seed = prompt_seed(&"z".repeat(64));
        assert!(seed <= 1 << 31);
    }

    #[test]
    fn url_uses_style_range_and_filter() {
        assert_eq!(
            placeholder_url("ab", Style::Metal),
            "https://picsum.photos/id/805/512/512?grayscale"
        );
        assert_eq!(
            placeholder_url("a", Style::Realistic),
            "https://picsum.photos/id/497/512/512"
        );
        assert_eq!(
            placeholder_url("", Style::Analog),
            "https://picsum.photos/id/200/512/512?blur=1"
        );
    }

    #[test]
    fn url_is_deterministic() {
        let a = placeholder_url("a misty forest at dawn", Style::Vintage);
        let b = placeholder_url("a misty forest at dawn", Style::Vintage);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_style_uses_realistic_placeholder() {
        let prompt = "a cat";
        assert_eq!(
            placeholder_url(prompt, Style::from_tag(Some("pastel"))),
            placeholder_url(prompt, Style::Realistic)
        );
    }
}
