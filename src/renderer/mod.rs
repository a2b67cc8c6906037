//! 2D rendering
//!
//! Scenes draw against the abstract [`Surface`]. The [`DrawList`] surface
//! records commands and tessellates them into colored triangles, which the
//! wgpu [`RenderState`] uploads and draws once per frame.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{BlockKind, Rect};
use crate::ui::font;

pub use draw::{DrawCommand, DrawList};
pub use pipeline::RenderState;
pub use vertex::{Color, Vertex, colors, rgb};

/// Procedurally drawn images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Block(BlockKind),
    Paddle,
    Ball,
    /// Title screen logo
    Logo,
    GameOverBanner,
}

impl Sprite {
    pub const LOGO_TEXT: &'static str = "BREAKOUT";
    pub const LOGO_TEXT_SIZE: f32 = 80.0;
    /// Gap and height of the colored stripe under the logo text
    pub const LOGO_STRIPE_GAP: f32 = 8.0;
    pub const LOGO_STRIPE_HEIGHT: f32 = 12.0;
    pub const BANNER_TEXT: &'static str = "GAME OVER";
    pub const BANNER_TEXT_SIZE: f32 = 64.0;

    /// Native size of the image
    pub fn size(self) -> Vec2 {
        match self {
            Sprite::Block(BlockKind::Gold) => Vec2::new(GOLD_BLOCK_WIDTH, GOLD_BLOCK_HEIGHT),
            Sprite::Block(_) => Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
            Sprite::Paddle => Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            Sprite::Ball => Vec2::splat(BALL_SIZE),
            Sprite::Logo => {
                let text = font::measure(Self::LOGO_TEXT, Self::LOGO_TEXT_SIZE);
                Vec2::new(
                    text.x,
                    text.y + Self::LOGO_STRIPE_GAP + Self::LOGO_STRIPE_HEIGHT,
                )
            }
            Sprite::GameOverBanner => font::measure(Self::BANNER_TEXT, Self::BANNER_TEXT_SIZE),
        }
    }
}

/// Fill color for a block kind
pub fn block_color(kind: BlockKind) -> Color {
    match kind {
        BlockKind::Red => colors::BLOCK_RED,
        BlockKind::Yellow => colors::BLOCK_YELLOW,
        BlockKind::Green => colors::BLOCK_GREEN,
        BlockKind::Blue => colors::BLOCK_BLUE,
        BlockKind::Purple => colors::BLOCK_PURPLE,
        BlockKind::Gold => colors::BLOCK_GOLD,
    }
}

/// Abstract 2D drawing target handed to scenes once per frame.
///
/// Coordinates are logical display pixels, origin top-left, y down.
pub trait Surface {
    /// Logical size of the drawable area
    fn size(&self) -> Vec2;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Border drawn inside `rect`
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Blit a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2);

    /// Single line of text with its top-left corner at `pos`; `size` is the
    /// line height
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);

    /// Restrict drawing to `rect` (intersected with any enclosing clip)
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);
}
