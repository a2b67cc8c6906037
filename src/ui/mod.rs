//! Widget framework
//!
//! Widgets consume [`InputEvent`](crate::platform::InputEvent)s, keep their
//! own interaction state and draw themselves onto a
//! [`Surface`](crate::renderer::Surface).

pub mod button;
pub mod font;
pub mod leaderboard_box;
pub mod text_box;

pub use button::{ButtonEvents, ButtonState, ButtonStyle, StandardButton, ToggleButton};
pub use leaderboard_box::LeaderboardsBox;
pub use text_box::TextBox;
