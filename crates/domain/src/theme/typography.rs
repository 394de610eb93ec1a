//! Typography scale.
//!
//! Large, readable text for young readers. Sizes are in `rem`, weights use
//! the CSS numeric scale.

use serde::{Deserialize, Serialize};

/// Font weight on the CSS numeric scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// 100
    Thin,
    /// 300
    Light,
    /// 400
    Normal,
    /// 500
    Medium,
    /// 600
    Semibold,
    /// 700
    Bold,
    /// 800
    Extrabold,
    /// 900
    Black,
}

impl FontWeight {
    /// Numeric weight.
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::Thin => 100,
            Self::Light => 300,
            Self::Normal => 400,
            Self::Medium => 500,
            Self::Semibold => 600,
            Self::Bold => 700,
            Self::Extrabold => 800,
            Self::Black => 900,
        }
    }
}

/// Line height presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    /// 1.0
    None,
    /// 1.25
    Tight,
    /// 1.375
    Snug,
    /// 1.5
    Normal,
    /// 1.625
    Relaxed,
    /// 2.0
    Loose,
}

impl LineHeight {
    /// Multiplier of the font size.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::None => 1.0,
            Self::Tight => 1.25,
            Self::Snug => 1.375,
            Self::Normal => 1.5,
            Self::Relaxed => 1.625,
            Self::Loose => 2.0,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Start aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// End aligned.
    Right,
    /// Justified.
    Justify,
}

/// Font size steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontSize {
    /// 0.75rem
    Xs,
    /// 0.875rem
    Sm,
    /// 1rem
    Base,
    /// 1.125rem
    Lg,
    /// 1.25rem
    Xl,
    /// 1.5rem
    Xl2,
    /// 1.875rem
    Xl3,
    /// 2.25rem
    Xl4,
}

impl FontSize {
    /// Size in rem.
    #[must_use]
    pub const fn rem(self) -> f32 {
        match self {
            Self::Xs => 0.75,
            Self::Sm => 0.875,
            Self::Base => 1.0,
            Self::Lg => 1.125,
            Self::Xl => 1.25,
            Self::Xl2 => 1.5,
            Self::Xl3 => 1.875,
            Self::Xl4 => 2.25,
        }
    }

    /// Size in pixels at a 16px root.
    #[must_use]
    pub fn px(self) -> f32 {
        self.rem() * 16.0
    }

    /// One step smaller, saturating at `Xs`.
    #[must_use]
    pub const fn smaller(self) -> Self {
        match self {
            Self::Xs | Self::Sm => Self::Xs,
            Self::Base => Self::Sm,
            Self::Lg => Self::Base,
            Self::Xl => Self::Lg,
            Self::Xl2 => Self::Xl,
            Self::Xl3 => Self::Xl2,
            Self::Xl4 => Self::Xl3,
        }
    }
}

/// A complete text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size.
    pub size: FontSize,
    /// Font weight.
    pub weight: FontWeight,
    /// Line height.
    pub line_height: LineHeight,
    /// Alignment.
    pub align: TextAlign,
}

impl TextStyle {
    const fn new(size: FontSize, weight: FontWeight, line_height: LineHeight) -> Self {
        Self {
            size,
            weight,
            line_height,
            align: TextAlign::Left,
        }
    }

    const fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

use FontSize::{Base, Lg, Sm, Xl, Xl2, Xl3, Xl4};
use FontWeight::{Bold, Normal as Regular, Semibold};
use LineHeight::{Normal as NormalLeading, Relaxed, Tight};

/// Heading levels.
pub mod heading {
    use super::*;

    /// Page title.
    pub const H1: TextStyle = TextStyle::new(Xl4, Bold, Tight);
    /// Section title.
    pub const H2: TextStyle = TextStyle::new(Xl3, Bold, Tight);
    /// Card title.
    pub const H3: TextStyle = TextStyle::new(Xl2, Semibold, Tight);
    /// Minor heading.
    pub const H4: TextStyle = TextStyle::new(Xl, Semibold, Tight);
}

/// Body copy.
pub mod body {
    use super::*;

    /// Lead paragraph.
    pub const LARGE: TextStyle = TextStyle::new(Lg, Regular, Relaxed);
    /// Default text.
    pub const MEDIUM: TextStyle = TextStyle::new(Base, Regular, Relaxed);
    /// Fine print.
    pub const SMALL: TextStyle = TextStyle::new(Sm, Regular, Relaxed);
}

/// Button labels.
pub mod button {
    use super::*;

    /// Large buttons.
    pub const LARGE: TextStyle = TextStyle::new(Xl, Bold, NormalLeading);
    /// Medium buttons.
    pub const MEDIUM: TextStyle = TextStyle::new(Lg, Semibold, NormalLeading);
    /// Small buttons.
    pub const SMALL: TextStyle = TextStyle::new(Base, Semibold, NormalLeading);
}

/// Adventure screens.
pub mod adventure {
    use super::*;

    /// Quest title.
    pub const QUEST: TextStyle = TextStyle::new(Xl2, Bold, NormalLeading).centered();
    /// The math problem itself.
    pub const PROBLEM: TextStyle = TextStyle::new(Xl4, Bold, NormalLeading).centered();
    /// Answer choices.
    pub const ANSWER: TextStyle = TextStyle::new(Xl, Semibold, NormalLeading);
    /// Reward callout.
    pub const REWARD: TextStyle = TextStyle::new(Lg, Bold, NormalLeading);
    /// Level caption.
    pub const LEVEL: TextStyle = TextStyle::new(Sm, Semibold, NormalLeading);
}

/// Feedback messages.
pub mod feedback {
    use super::*;

    /// Any feedback line.
    pub const MESSAGE: TextStyle = TextStyle::new(Lg, Semibold, NormalLeading);
}

/// Progress labels.
pub mod progress {
    use super::*;

    /// XP caption.
    pub const XP: TextStyle = TextStyle::new(Sm, Semibold, NormalLeading);
    /// Level caption.
    pub const LEVEL: TextStyle = TextStyle::new(Sm, Bold, NormalLeading);
    /// Coin counter.
    pub const COIN: TextStyle = TextStyle::new(Lg, Bold, NormalLeading);
    /// Star counter.
    pub const STAR: TextStyle = TextStyle::new(Lg, Bold, NormalLeading);
}

/// Resolves a dotted style path such as `heading.h1`.
#[must_use]
pub fn lookup(path: &str) -> Option<TextStyle> {
    let style = match path {
        "heading.h1" => heading::H1,
        "heading.h2" => heading::H2,
        "heading.h3" => heading::H3,
        "heading.h4" => heading::H4,
        "body.large" => body::LARGE,
        "body.medium" => body::MEDIUM,
        "body.small" => body::SMALL,
        "interactive.button.large" => button::LARGE,
        "interactive.button.medium" => button::MEDIUM,
        "interactive.button.small" => button::SMALL,
        "adventure.quest" => adventure::QUEST,
        "adventure.problem" => adventure::PROBLEM,
        "adventure.answer" => adventure::ANSWER,
        "adventure.reward" => adventure::REWARD,
        "adventure.level" => adventure::LEVEL,
        "feedback.success" | "feedback.error" | "feedback.warning" | "feedback.info" => {
            feedback::MESSAGE
        }
        "progress.xp" => progress::XP,
        "progress.level" => progress::LEVEL,
        "progress.coin" => progress::COIN,
        "progress.star" => progress::STAR,
        _ => return None,
    };
    Some(style)
}

/// Like [`lookup`], but logs and falls back to medium body text.
#[must_use]
pub fn style(path: &str) -> TextStyle {
    lookup(path).unwrap_or_else(|| {
        tracing::warn!(path, "typography path not found");
        body::MEDIUM
    })
}

/// Style for a viewport: compact screens drop one size step.
#[must_use]
pub fn responsive(style: TextStyle, compact: bool) -> TextStyle {
    if compact {
        TextStyle {
            size: style.size.smaller(),
            ..style
        }
    } else {
        style
    }
}
