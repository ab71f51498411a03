//! Visual style presets: prompt enhancement phrases and placeholder settings.

use serde::Serialize;

/// Suffix appended after the style phrase on every enhanced prompt.
pub const QUALITY_SUFFIX: &str = "high quality, detailed, professional";

/// A generation style. Unknown tags collapse to [`Style::Realistic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Analog,
    Metal,
    Vintage,
    Realistic,
}

/// Placeholder image selection for a style.
///
/// The picsum image id is `seed % modulus + offset`, so every style draws
/// from its own id range. `filter` is appended verbatim to the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderConfig {
    pub modulus: u64,
    pub offset: u64,
    pub filter: &'static str,
}

impl Style {
    /// Resolve a style tag. Matching is exact; anything else is realistic.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("analog") => Self::Analog,
            Some("metal") => Self::Metal,
            Some("vintage") => Self::Vintage,
            _ => Self::Realistic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analog => "analog",
            Self::Metal => "metal",
            Self::Vintage => "vintage",
            Self::Realistic => "realistic",
        }
    }

    /// Descriptor phrase appended to prompts generated in this style.
    pub fn enhancement(self) -> &'static str {
        match self {
            Self::Analog => {
                "warm colors, hand-drawn texture, natural feeling, vintage aesthetic, \
                 film grain, analog photography style"
            }
            Self::Metal => {
                "cold metallic surfaces, industrial design, sharp edges, chrome finish, \
                 modern technology, metallic textures, steel finish"
            }
            Self::Vintage => {
                "classic retro style, faded colors, aged paper texture, nostalgic mood, \
                 antique elements, vintage aesthetic, sepia tones"
            }
            Self::Realistic => {
                "photorealistic, high detail, natural lighting, professional photography, \
                 8k resolution"
            }
        }
    }

    pub fn placeholder(self) -> PlaceholderConfig {
        match self {
            Self::Analog => PlaceholderConfig {
                modulus: 500,
                offset: 200,
                filter: "?blur=1",
            },
            Self::Metal => PlaceholderConfig {
                modulus: 300,
                offset: 700,
                filter: "?grayscale",
            },
            Self::Vintage => PlaceholderConfig {
                modulus: 400,
                offset: 100,
                filter: "?blur=2",
            },
            Self::Realistic => PlaceholderConfig {
                modulus: 600,
                offset: 400,
                filter: "",
            },
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append the style phrase and the quality suffix to a user prompt.
pub fn enhance_prompt(prompt: &str, style: Style) -> String {
    format!("{prompt}, {}, {QUALITY_SUFFIX}", style.enhancement())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse() {
        assert_eq!(Style::from_tag(Some("analog")), Style::Analog);
        assert_eq!(Style::from_tag(Some("metal")), Style::Metal);
        assert_eq!(Style::from_tag(Some("vintage")), Style::Vintage);
        assert_eq!(Style::from_tag(Some("realistic")), Style::Realistic);
    }

    #[test]
    fn unknown_missing_and_empty_tags_fall_back_to_realistic() {
        assert_eq!(Style::from_tag(Some("watercolor")), Style::Realistic);
        assert_eq!(Style::from_tag(Some("METAL")), Style::Realistic);
        assert_eq!(Style::from_tag(Some("")), Style::Realistic);
        assert_eq!(Style::from_tag(None), Style::Realistic);
    }

    #[test]
    fn enhance_prompt_appends_phrase_and_suffix() {
        let out = enhance_prompt("a cat", Style::Metal);
        assert!(out.starts_with("a cat, cold metallic surfaces"));
        assert!(out.ends_with("steel finish, high quality, detailed, professional"));
    }

    #[test]
    fn unknown_style_enhancement_matches_realistic() {
        let unknown = enhance_prompt("a cat", Style::from_tag(Some("pastel")));
        assert_eq!(unknown, enhance_prompt("a cat", Style::Realistic));
        assert!(unknown.contains("8k resolution"));
    }

    #[test]
    fn placeholder_ranges_do_not_start_at_zero() {
        for style in [Style::Analog, Style::Metal, Style::Vintage, Style::Realistic] {
            assert!(style.placeholder().offset >= 100);
        }
        assert_eq!(Style::Metal.placeholder().filter, "?grayscale");
        assert_eq!(Style::Realistic.placeholder().filter, "");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_value(Style::Vintage).unwrap(), "vintage");
    }
}
