//! Platform abstraction layer
//!
//! Backend-neutral pieces the driver hands to the game:
//! - Input events and the held-key snapshot
//! - Frame pacing, game time and FPS measurement

pub mod clock;
pub mod input;

pub use clock::{FrameClock, seed_from_clock};
pub use input::{InputEvent, Key, KeyState, PointerButton};
