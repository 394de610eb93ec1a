//! Color tokens of the Numberland palette.
//!
//! Bright, playful colors for a kid-friendly math adventure. Tokens are
//! grouped the same way designers refer to them (`primary.blue`,
//! `interactive.hover.primary`, ...) and can be looked up by dotted path.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An sRGB color with 8-bit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black, used when a token path is unknown.
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Creates a color with alpha given as a fraction in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => {
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    0xFF
                };
                Ok(Self {
                    r: channel(&digits[0..2])?,
                    g: channel(&digits[2..4])?,
                    b: channel(&digits[4..6])?,
                    a,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Upper-case `#RRGGBB`, alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction.
    #[must_use]
    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// CSS representation: hex when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 0xFF {
            return self.to_hex();
        }
        let alpha = format!("{:.2}", self.alpha());
        let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Two-stop linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Direction in degrees.
    pub angle: u16,
    /// Color at 0%.
    pub from: Color,
    /// Color at 100%.
    pub to: Color,
}

impl Gradient {
    /// CSS `linear-gradient(...)` string.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "linear-gradient({}deg, {} 0%, {} 100%)",
            self.angle,
            self.from.to_css(),
            self.to.to_css()
        )
    }
}

/// Brand colors.
pub mod primary {
    use super::Color;

    /// Bright blue, friendly.
    pub const BLUE: Color = Color::rgb(0x4A, 0x90, 0xE2);
    /// Sunny yellow, cheerful.
    pub const YELLOW: Color = Color::rgb(0xFF, 0xD9, 0x3D);
    /// Fresh green, progress.
    pub const GREEN: Color = Color::rgb(0x6B, 0xCB, 0x77);
    /// Soft red, playful not scary.
    pub const RED: Color = Color::rgb(0xFF, 0x6B, 0x6B);
}

/// Surface colors.
pub mod background {
    use super::Color;

    /// Light sky off-white.
    pub const PRIMARY: Color = Color::rgb(0xF7, 0xF9, 0xFC);
    /// Pure white.
    pub const SECONDARY: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Card surface.
    pub const CARD: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Modal overlay, half transparent black.
    pub const OVERLAY: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0x80,
    };
}

/// Text colors.
pub mod text {
    use super::Color;

    /// Main text.
    pub const PRIMARY: Color = Color::rgb(0x2D, 0x37, 0x48);
    /// Secondary text.
    pub const SECONDARY: Color = Color::rgb(0x71, 0x80, 0x96);
    /// Text on dark backgrounds.
    pub const LIGHT: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Disabled text.
    pub const MUTED: Color = Color::rgb(0xA0, 0xAE, 0xC0);
}

/// Hover, active and disabled states.
pub mod interactive {
    /// Hover shades.
    pub mod hover {
        use super::super::Color;

        /// Darker blue.
        pub const PRIMARY: Color = Color::rgb(0x35, 0x7A, 0xBD);
        /// Darker yellow.
        pub const SECONDARY: Color = Color::rgb(0xE6, 0xB8, 0x00);
        /// Darker green.
        pub const SUCCESS: Color = Color::rgb(0x5A, 0x9F, 0x65);
        /// Darker red.
        pub const ERROR: Color = Color::rgb(0xE5, 0x5A, 0x5A);
    }

    /// Pressed shades.
    pub mod active {
        use super::super::Color;

        /// Even darker blue.
        pub const PRIMARY: Color = Color::rgb(0x2D, 0x5F, 0x9E);
        /// Even darker yellow.
        pub const SECONDARY: Color = Color::rgb(0xCC, 0x99, 0x00);
        /// Even darker green.
        pub const SUCCESS: Color = Color::rgb(0x4A, 0x8A, 0x54);
        /// Even darker red.
        pub const ERROR: Color = Color::rgb(0xCC, 0x4D, 0x4D);
    }

    /// Disabled controls.
    pub mod disabled {
        use super::super::Color;

        /// Light gray fill.
        pub const BACKGROUND: Color = Color::rgb(0xE2, 0xE8, 0xF0);
        /// Muted label.
        pub const TEXT: Color = Color::rgb(0xA0, 0xAE, 0xC0);
    }
}

/// Status colors.
pub mod status {
    use super::{Color, primary};

    /// Success.
    pub const SUCCESS: Color = primary::GREEN;
    /// Warning.
    pub const WARNING: Color = primary::YELLOW;
    /// Error.
    pub const ERROR: Color = primary::RED;
    /// Info.
    pub const INFO: Color = primary::BLUE;
}

/// Progress and achievement colors.
pub mod progress {
    use super::{Color, Gradient, primary};

    /// XP bar track.
    pub const XP_BAR_BACKGROUND: Color = Color::rgb(0xE2, 0xE8, 0xF0);
    /// XP bar fill.
    pub const XP_BAR_FILL: Color = primary::BLUE;
    /// XP bar gradient fill.
    pub const XP_BAR_GRADIENT: Gradient = Gradient {
        angle: 90,
        from: primary::BLUE,
        to: primary::GREEN,
    };
    /// Level badge.
    pub const LEVEL_BACKGROUND: Color = primary::YELLOW;
    /// Level badge text.
    pub const LEVEL_TEXT: Color = Color::rgb(0x2D, 0x37, 0x48);
    /// Star gold.
    pub const STAR: Color = primary::YELLOW;
    /// Coin gold.
    pub const COIN: Color = Color::rgb(0xFF, 0xD7, 0x00);
}

/// Adventure theme colors.
pub mod adventure {
    use super::Color;

    /// Treasure gold.
    pub const TREASURE: Color = Color::rgb(0xFF, 0xD7, 0x00);
    /// Jungle green.
    pub const FOREST: Color = Color::rgb(0x6B, 0xCB, 0x77);
    /// Sky blue.
    pub const SKY: Color = Color::rgb(0x4A, 0x90, 0xE2);
    /// Earth brown.
    pub const EARTH: Color = Color::rgb(0x8B, 0x45, 0x13);
}

/// Resolves a dotted token path such as `interactive.hover.primary`.
#[must_use]
pub fn lookup(path: &str) -> Option<Color> {
    let color = match path {
        "primary.blue" => primary::BLUE,
        "primary.yellow" => primary::YELLOW,
        "primary.green" => primary::GREEN,
        "primary.red" => primary::RED,
        "background.primary" => background::PRIMARY,
        "background.secondary" => background::SECONDARY,
        "background.card" => background::CARD,
        "background.overlay" => background::OVERLAY,
        "text.primary" => text::PRIMARY,
        "text.secondary" => text::SECONDARY,
        "text.light" => text::LIGHT,
        "text.muted" => text::MUTED,
        "interactive.hover.primary" => interactive::hover::PRIMARY,
        "interactive.hover.secondary" => interactive::hover::SECONDARY,
        "interactive.hover.success" => interactive::hover::SUCCESS,
        "interactive.hover.error" => interactive::hover::ERROR,
        "interactive.active.primary" => interactive::active::PRIMARY,
        "interactive.active.secondary" => interactive::active::SECONDARY,
        "interactive.active.success" => interactive::active::SUCCESS,
        "interactive.active.error" => interactive::active::ERROR,
        "interactive.disabled.background" => interactive::disabled::BACKGROUND,
        "interactive.disabled.text" => interactive::disabled::TEXT,
        "status.success" => status::SUCCESS,
        "status.warning" => status::WARNING,
        "status.error" => status::ERROR,
        "status.info" => status::INFO,
        "progress.xpBar.background" => progress::XP_BAR_BACKGROUND,
        "progress.xpBar.fill" => progress::XP_BAR_FILL,
        "progress.level.background" => progress::LEVEL_BACKGROUND,
        "progress.level.text" => progress::LEVEL_TEXT,
        "progress.star" => progress::STAR,
        "progress.coin" => progress::COIN,
        "adventure.treasure" => adventure::TREASURE,
        "adventure.forest" => adventure::FOREST,
        "adventure.sky" => adventure::SKY,
        "adventure.earth" => adventure::EARTH,
        _ => return None,
    };
    Some(color)
}

/// Like [`lookup`], but logs and falls back to black for unknown paths.
#[must_use]
pub fn color(path: &str) -> Color {
    lookup(path).unwrap_or_else(|| {
        tracing::warn!(path, "color path not found");
        Color::BLACK
    })
}
