//! Collision classification between axis-aligned rectangles
//!
//! Discrete, frame-sampled overlap tests. A fast ball can tunnel through a
//! block between two frames; that is accepted at the speeds this game uses.

use super::rect::Rect;

/// Which way a block hit sends the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSide {
    /// Ball came in through the block's left edge
    Left,
    /// Ball came in through the block's right edge
    Right,
    /// Top, bottom or ambiguous contact
    Vertical,
}

/// Classify an overlapping ball/block pair by the side that was hit
pub fn classify_block_hit(ball: &Rect, block: &Rect) -> HitSide {
    let top_inside = ball.top() > block.top() && ball.top() < block.bottom();
    let bottom_inside = ball.bottom() > block.top() && ball.bottom() < block.bottom();
    let vertical_overlap = top_inside || bottom_inside;

    if ball.right() >= block.left() && ball.center_x() < block.left() && vertical_overlap {
        HitSide::Left
    } else if ball.left() <= block.right() && ball.center_x() > block.right() && vertical_overlap {
        HitSide::Right
    } else {
        HitSide::Vertical
    }
}

/// Signed horizontal distance from the paddle center to the ball center
#[inline]
pub fn paddle_offset(ball: &Rect, paddle: &Rect) -> f32 {
    ball.center_x() - paddle.center_x()
}

/// Ball dropped below the paddle line outside its span, or off the display
pub fn ball_missed(ball: &Rect, paddle: &Rect, display_height: f32) -> bool {
    let below_line = ball.bottom() > paddle.top();
    let outside_span = ball.right() < paddle.left() || ball.left() > paddle.right();
    (below_line && outside_span) || ball.top() > display_height
}
