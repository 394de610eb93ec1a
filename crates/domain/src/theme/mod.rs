//! Design system: color tokens, typography and presentational view models.

pub mod button;
pub mod colors;
pub mod progress;
pub mod typography;

pub use button::{ButtonColors, ButtonSize, ButtonVariant, PlayfulButton};
pub use colors::{Color, Gradient};
pub use progress::{ProgressBar, ProgressVariant};
pub use typography::{FontSize, FontWeight, LineHeight, TextAlign, TextStyle};
