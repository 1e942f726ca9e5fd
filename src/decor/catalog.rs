//! Static choices offered by the strip editor.

use crate::foundation::core::Rgba8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FontChoice {
    pub name: &'static str,
    /// Font stack stored on text elements.
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StickerCategory {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

pub const FONTS: &[FontChoice] = &[
    FontChoice {
        name: "Pacifico",
        value: "Pacifico, cursive",
    },
    FontChoice {
        name: "Delius",
        value: "Delius, cursive",
    },
    FontChoice {
        name: "Comic Neue",
        value: "\"Comic Neue\", cursive",
    },
    FontChoice {
        name: "Yellowtail",
        value: "Yellowtail, cursive",
    },
    FontChoice {
        name: "Tangerine",
        value: "Tangerine, cursive",
    },
    FontChoice {
        name: "Tinos",
        value: "Tinos, serif",
    },
];

pub const STICKERS: &[StickerCategory] = &[
    StickerCategory {
        name: "Smileys",
        items: &[
            "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰", "😍",
            "🤩", "😘", "😗", "😚", "😙",
        ],
    },
    StickerCategory {
        name: "Hearts",
        items: &[
            "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💕", "💞", "💓", "💗", "💖", "💘",
            "💝", "💟", "♥️", "💌",
        ],
    },
    StickerCategory {
        name: "Party",
        items: &[
            "🎉", "🎊", "🎈", "🎁", "🎀", "🎂", "🧁", "🍰", "🥳", "🎆", "🎇", "✨", "🎄", "🎃", "🎗️",
            "🏆", "🥇", "🎯", "🎪",
        ],
    },
    StickerCategory {
        name: "Symbols",
        items: &[
            "⭐", "🌟", "💫", "✨", "🔥", "💥", "💢", "💦", "💨", "🌈", "☀️", "🌙", "⚡", "☁️", "❄️",
            "🌸", "🌺", "🌼", "🌻", "🌹",
        ],
    },
    StickerCategory {
        name: "Fun",
        items: &[
            "🦄", "🌵", "🍕", "🍔", "🍦", "🍩", "🍪", "🎸", "🎵", "🎶", "📷", "🎬", "🎮", "🕹️", "🎲",
            "🧩", "🎨", "✏️", "📌", "📍",
        ],
    },
];

/// Strip background swatches, as hex strings.
pub const BACKGROUND_PRESETS: &[&str] = &[
    "#ffffff", "#fef3c7", "#fecaca", "#bfdbfe", "#c7d2fe", "#ddd6fe", "#fbcfe8", "#fed7aa",
];

pub const TEXT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 16..=72;
pub const STICKER_SIZE_RANGE: std::ops::RangeInclusive<u32> = 24..=120;

/// Font stack for a display name, case-insensitively.
pub fn font_by_name(name: &str) -> Option<&'static FontChoice> {
    FONTS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

pub fn default_font() -> &'static FontChoice {
    &FONTS[0]
}

pub fn is_catalog_sticker(glyph: &str) -> bool {
    STICKERS
        .iter()
        .any(|c| c.items.iter().any(|item| *item == glyph))
}

pub fn background_presets() -> impl Iterator<Item = Rgba8> {
    BACKGROUND_PRESETS
        .iter()
        .filter_map(|hex| Rgba8::from_hex(hex).ok())
}

#[cfg(test)]
#[path = "../../tests/unit/decor/catalog.rs"]
mod tests;
