//! Playful button view model.

use serde::{Deserialize, Serialize};

use super::colors::{Color, interactive, primary, text};
use super::typography::{self, TextStyle};

/// Button color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Blue call to action.
    #[default]
    Primary,
    /// Yellow secondary action.
    Secondary,
    /// Green confirmation.
    Success,
    /// Red destructive action.
    Error,
}

/// Button size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// Compact.
    Sm,
    /// Regular.
    Md,
    /// Large, the default for touch screens.
    #[default]
    Lg,
}

impl ButtonSize {
    /// Horizontal and vertical padding in rem.
    #[must_use]
    pub const fn padding(self) -> (f32, f32) {
        match self {
            Self::Sm => (1.0, 0.5),
            Self::Md => (1.5, 0.75),
            Self::Lg => (2.0, 1.0),
        }
    }

    /// Label style.
    #[must_use]
    pub const fn label(self) -> TextStyle {
        match self {
            Self::Sm => typography::button::SMALL,
            Self::Md => typography::button::MEDIUM,
            Self::Lg => typography::button::LARGE,
        }
    }
}

/// Colors of a button in each interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    /// Resting fill.
    pub fill: Color,
    /// Label color.
    pub label: Color,
    /// Fill on hover.
    pub hover: Color,
    /// Fill while pressed.
    pub active: Color,
}

impl ButtonVariant {
    /// Colors for this variant.
    #[must_use]
    pub const fn colors(self) -> ButtonColors {
        match self {
            Self::Primary => ButtonColors {
                fill: primary::BLUE,
                label: text::LIGHT,
                hover: interactive::hover::PRIMARY,
                active: interactive::active::PRIMARY,
            },
            Self::Secondary => ButtonColors {
                fill: primary::YELLOW,
                label: text::PRIMARY,
                hover: interactive::hover::SECONDARY,
                active: interactive::active::SECONDARY,
            },
            Self::Success => ButtonColors {
                fill: primary::GREEN,
                label: text::LIGHT,
                hover: interactive::hover::SUCCESS,
                active: interactive::active::SUCCESS,
            },
            Self::Error => ButtonColors {
                fill: primary::RED,
                label: text::LIGHT,
                hover: interactive::hover::ERROR,
                active: interactive::active::ERROR,
            },
        }
    }
}

/// Everything a renderer needs to draw a button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayfulButton {
    /// Visible label.
    pub label: String,
    /// Color scheme.
    pub variant: ButtonVariant,
    /// Size.
    pub size: ButtonSize,
    /// Disabled buttons ignore hover and press.
    pub disabled: bool,
    /// Accessible label, when it differs from the visible one.
    pub aria_label: Option<String>,
}

impl PlayfulButton {
    /// Creates an enabled, large, primary button.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the variant.
    #[must_use]
    pub const fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the size.
    #[must_use]
    pub const fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the accessible label.
    #[must_use]
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Whether hover and press feedback apply.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        !self.disabled
    }

    /// Scale factor for the hover state.
    #[must_use]
    pub const fn hover_scale(&self) -> f32 {
        if self.disabled { 1.0 } else { 1.05 }
    }

    /// Scale factor for the pressed state.
    #[must_use]
    pub const fn press_scale(&self) -> f32 {
        if self.disabled { 1.0 } else { 0.95 }
    }

    /// Resting fill, grayed out when disabled.
    #[must_use]
    pub const fn fill(&self) -> Color {
        if self.disabled {
            interactive::disabled::BACKGROUND
        } else {
            self.variant.colors().fill
        }
    }

    /// Label color, muted when disabled.
    #[must_use]
    pub const fn label_color(&self) -> Color {
        if self.disabled {
            interactive::disabled::TEXT
        } else {
            self.variant.colors().label
        }
    }

    /// Name announced by assistive technology.
    #[must_use]
    pub fn accessible_name(&self) -> &str {
        self.aria_label.as_deref().unwrap_or(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_large_primary() {
        let button = PlayfulButton::new("Go");
        assert_eq!(button.variant, ButtonVariant::Primary);
        assert_eq!(button.size, ButtonSize::Lg);
        assert!(button.is_interactive());
        assert_eq!(button.fill(), primary::BLUE);
    }

    #[test]
    fn disabled_button_is_flat_and_gray() {
        let button = PlayfulButton::new("Go")
            .variant(ButtonVariant::Error)
            .disabled(true);
        assert!(!button.is_interactive());
        assert!((button.hover_scale() - 1.0).abs() < f32::EPSILON);
        assert_eq!(button.fill(), interactive::disabled::BACKGROUND);
        assert_eq!(button.label_color(), interactive::disabled::TEXT);
    }

    #[test]
    fn secondary_uses_dark_label() {
        let colors = ButtonVariant::Secondary.colors();
        assert_eq!(colors.label, text::PRIMARY);
        assert_eq!(colors.hover.to_hex(), "#E6B800");
    }

    #[test]
    fn accessible_name_prefers_aria_label() {
        let button = PlayfulButton::new("🚀").aria_label("Start adventure");
        assert_eq!(button.accessible_name(), "Start adventure");
        assert_eq!(PlayfulButton::new("Go").accessible_name(), "Go");
    }

    #[test]
    fn sizes_scale_padding() {
        assert!(ButtonSize::Lg.padding().0 > ButtonSize::Sm.padding().0);
        assert_eq!(ButtonSize::Md.label(), typography::button::MEDIUM);
    }
}
