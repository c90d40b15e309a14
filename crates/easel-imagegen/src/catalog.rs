/// Selectable style preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    /// Identifier sent to the provider
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description shown next to the name
    pub description: &'static str,
}

/// Styles offered to the user, in display order
pub const STYLE_PRESETS: [StylePreset; 11] = [
    StylePreset {
        id: "photographic",
        name: "Photographic",
        description: "Realistic photographic style",
    },
    StylePreset {
        id: "cinematic",
        name: "Cinematic",
        description: "Movie-like visual style",
    },
    StylePreset {
        id: "digital-art",
        name: "Digital Art",
        description: "Digital artwork style",
    },
    StylePreset {
        id: "cartoon",
        name: "Cartoon",
        description: "Animated cartoon style",
    },
    StylePreset {
        id: "painting",
        name: "Painting",
        description: "Traditional painting style",
    },
    StylePreset {
        id: "3d-model",
        name: "3D Model",
        description: "Three-dimensional rendered model",
    },
    StylePreset {
        id: "pixel-art",
        name: "Pixel Art",
        description: "Retro pixel art style",
    },
    StylePreset {
        id: "comic-book",
        name: "Comic Book",
        description: "Comic book illustration style",
    },
    StylePreset {
        id: "fantasy-art",
        name: "Fantasy Art",
        description: "Fantasy themed artwork",
    },
    StylePreset {
        id: "neon",
        name: "Neon",
        description: "Bright neon illuminated style",
    },
    StylePreset {
        id: "isometric",
        name: "Isometric",
        description: "Isometric design view",
    },
];

/// UI identifiers the provider knows under another name
const STYLE_ALIASES: [(&str, &str); 1] = [("neon", "neon-punk")];

/// Selectable output size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOption {
    /// `WIDTHxHEIGHT`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
}

/// Sizes offered to the user, smallest first
pub const SIZE_OPTIONS: [SizeOption; 5] = [
    SizeOption {
        id: "512x512",
        name: "512 × 512",
    },
    SizeOption {
        id: "512x768",
        name: "512 × 768",
    },
    SizeOption {
        id: "768x512",
        name: "768 × 512",
    },
    SizeOption {
        id: "768x768",
        name: "768 × 768",
    },
    SizeOption {
        id: "1024x1024",
        name: "1024 × 1024",
    },
];

/// Map a style identifier to the identifier the provider expects
///
/// Unknown identifiers pass through unchanged.
pub fn resolve_style(id: &str) -> &str {
    STYLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map_or(id, |(_, provider_id)| provider_id)
}

/// Look up a preset by identifier
pub fn find_style(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|preset| preset.id == id)
}

/// Parse `WIDTHxHEIGHT` into a pair of positive dimensions
pub fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (width, height) = size.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

/// Render a size for display (`1024x1024` becomes `1024 × 1024`)
pub fn format_image_size(size: &str) -> String {
    parse_size(size).map_or_else(|| size.to_string(), |(w, h)| format!("{w} × {h}"))
}
