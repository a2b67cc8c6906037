//! Breakout - a classic paddle-and-blocks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (entities, collisions, state machine)
//! - `ui`: Widget framework (buttons, scrollable table, text box, bitmap font)
//! - `scenes`: Scene trait, scene manager and every screen of the game
//! - `renderer`: Abstract 2D surface, draw lists and the wgpu pipeline
//! - `platform`: Input events and frame pacing
//! - `leaderboard` / `persistence`: Score records on disk

pub mod app;
pub mod audio;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scenes;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::AppError;
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardStore};
pub use settings::{ControlMode, Settings, SharedSettings};

/// Game configuration constants
pub mod consts {
    /// Logical display size in pixels
    pub const DISPLAY_WIDTH: f32 = 800.0;
    pub const DISPLAY_HEIGHT: f32 = 600.0;
    /// Target frames per second
    pub const FRAME_RATE: u32 = 60;
    pub const WINDOW_TITLE: &str = "Breakout";

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_START_X: f32 = 370.0;
    /// Distance from the bottom of the display to the paddle top
    pub const PADDLE_BOTTOM_MARGIN: f32 = 50.0;
    /// Keyboard steering speed (pixels per frame)
    pub const PADDLE_KEY_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_START_Y_SPEED: f32 = 4.0;
    pub const BALL_MAX_SPEED: f32 = 8.0;
    /// Paddle offset (pixels) that maps to full horizontal speed
    pub const DEFLECT_DIVISOR: f32 = 40.0;
    /// Floor for horizontal speed after a paddle deflection
    pub const MIN_DEFLECT_SPEED: f32 = 1.0;

    /// Block grid
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 15.0;
    pub const GOLD_BLOCK_WIDTH: f32 = 70.0;
    pub const GOLD_BLOCK_HEIGHT: f32 = 21.0;
    /// Gold blocks are drawn bigger, shifted up-left so they stay centered
    pub const GOLD_OFFSET_X: f32 = 5.0;
    pub const GOLD_OFFSET_Y: f32 = 3.0;
    pub const GRID_START_X: f32 = 10.0;
    pub const GRID_START_Y: f32 = 40.0;
    pub const GRID_COLUMNS: usize = 12;
    pub const ROWS_PER_COLOR: usize = 2;
    pub const COLUMN_PITCH: f32 = 65.0;
    pub const ROW_PITCH: f32 = 20.0;

    /// Player lives at the start of a game
    pub const STARTING_LIVES: u8 = 3;

    /// Speed ramp (time in play, ms -> vertical speed)
    pub const SPEED_UP_1_MS: u64 = 60_000;
    pub const SPEED_UP_1_Y_SPEED: f32 = 6.0;
    pub const SPEED_UP_2_MS: u64 = 120_000;
    pub const SPEED_UP_2_Y_SPEED: f32 = 8.0;

    /// Gold block cadence (time in play, ms)
    pub const GOLD_INTERVAL_MS: u64 = 10_000;
}
