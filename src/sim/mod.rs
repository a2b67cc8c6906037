//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame-stepped only, driven by the game clock passed in
//! - Seeded RNG only
//! - Stable iteration order (blocks kept in grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{HitSide, ball_missed, classify_block_hit, paddle_offset};
pub use rect::Rect;
pub use state::{
    Ball, Block, BlockKind, Direction, GameEvent, GamePhase, GameState, GoldTimer, Paddle,
    PlayClock, SpeedRamp,
};
pub use tick::{TickInput, tick};
