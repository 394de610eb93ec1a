//! Progress bar view model for XP, level and quest bars.

use serde::{Deserialize, Serialize};

use super::colors::{Color, Gradient, primary, progress, text};

/// Number of stars shown under an XP bar.
pub const STAR_COUNT: u32 = 5;

/// XP needed per level.
pub const XP_PER_LEVEL: u64 = 100;

/// What the bar measures. Only changes colors and star display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressVariant {
    /// Experience points.
    #[default]
    Xp,
    /// Level progress.
    Level,
    /// Quest progress.
    Quest,
}

const ORANGE: Color = Color::rgb(0xF9, 0x73, 0x16);
const PURPLE: Color = Color::rgb(0xA8, 0x55, 0xF7);
const PINK: Color = Color::rgb(0xEC, 0x48, 0x99);
const LABEL_QUEST: Color = Color::rgb(0x4A, 0x55, 0x68);

impl ProgressVariant {
    /// Fill gradient.
    #[must_use]
    pub const fn fill(self) -> Gradient {
        match self {
            Self::Xp => progress::XP_BAR_GRADIENT,
            Self::Level => Gradient {
                angle: 90,
                from: primary::YELLOW,
                to: ORANGE,
            },
            Self::Quest => Gradient {
                angle: 90,
                from: PURPLE,
                to: PINK,
            },
        }
    }

    /// Track color behind the fill.
    #[must_use]
    pub const fn track(self) -> Color {
        progress::XP_BAR_BACKGROUND
    }

    /// Label color.
    #[must_use]
    pub const fn label_color(self) -> Color {
        match self {
            Self::Xp => text::SECONDARY,
            Self::Level => text::PRIMARY,
            Self::Quest => LABEL_QUEST,
        }
    }
}

/// A progress bar's data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressBar {
    /// Current value.
    pub current: u64,
    /// Value at 100%.
    pub max: u64,
    /// Optional caption.
    pub label: Option<String>,
    /// What is measured.
    pub variant: ProgressVariant,
    /// Show the rounded percentage next to the value.
    pub show_percentage: bool,
    /// Show level and stars (XP bars only).
    pub show_stars: bool,
}

impl ProgressBar {
    /// Creates an XP bar.
    #[must_use]
    pub fn new(current: u64, max: u64) -> Self {
        Self {
            current,
            max,
            ..Self::default()
        }
    }

    /// Sets the variant.
    #[must_use]
    pub const fn variant(mut self, variant: ProgressVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the caption.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Enables the percentage readout.
    #[must_use]
    pub const fn with_percentage(mut self) -> Self {
        self.show_percentage = true;
        self
    }

    /// Enables the level and stars row.
    #[must_use]
    pub const fn with_stars(mut self) -> Self {
        self.show_stars = true;
        self
    }

    /// Fill percentage, capped at 100. A zero max reads as empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        (self.current as f64 / self.max as f64 * 100.0).min(100.0)
    }

    /// Percentage rounded for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage().round() as u32
    }

    /// `"current / max"` readout.
    #[must_use]
    pub fn value_text(&self) -> String {
        format!("{} / {}", self.current, self.max)
    }

    /// Level derived from the current XP.
    #[must_use]
    pub const fn level(&self) -> u64 {
        self.current / XP_PER_LEVEL + 1
    }

    /// Number of lit stars out of [`STAR_COUNT`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn filled_stars(&self) -> u32 {
        ((self.percentage() / 20.0).floor() as u32).min(STAR_COUNT)
    }

    /// Whether the level and stars row is rendered.
    #[must_use]
    pub fn stars_visible(&self) -> bool {
        self.show_stars && self.variant == ProgressVariant::Xp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_capped() {
        assert!((ProgressBar::new(50, 200).percentage() - 25.0).abs() < f64::EPSILON);
        assert!((ProgressBar::new(300, 200).percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_max_is_empty() {
        let bar = ProgressBar::new(10, 0);
        assert!(bar.percentage().abs() < f64::EPSILON);
        assert_eq!(bar.filled_stars(), 0);
    }

    #[test]
    fn stars_and_level() {
        let bar = ProgressBar::new(250, 400).with_stars();
        assert_eq!(bar.rounded_percentage(), 63);
        assert_eq!(bar.filled_stars(), 3);
        assert_eq!(bar.level(), 3);
        assert!(bar.stars_visible());
        assert_eq!(ProgressBar::new(100, 100).filled_stars(), 5);
    }

    #[test]
    fn stars_only_for_xp() {
        let bar = ProgressBar::new(1, 2)
            .variant(ProgressVariant::Quest)
            .with_stars();
        assert!(!bar.stars_visible());
    }

    #[test]
    fn value_text() {
        let bar = ProgressBar::new(40, 100).label("XP").with_percentage();
        assert_eq!(bar.value_text(), "40 / 100");
        assert_eq!(bar.label.as_deref(), Some("XP"));
        assert!(bar.show_percentage);
    }

    #[test]
    fn variant_colors() {
        assert_eq!(ProgressVariant::Level.fill().from, primary::YELLOW);
        assert_eq!(ProgressVariant::Level.label_color(), text::PRIMARY);
        assert_eq!(ProgressVariant::Xp.track(), progress::XP_BAR_BACKGROUND);
    }
}
