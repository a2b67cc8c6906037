//! Scrollable leaderboard table
//!
//! Rows are drawn inside a clipped container; a draggable thumb on the right
//! picks how far down the table is scrolled. The thumb position maps to a
//! percentage traveled (0..=100), and that percentage maps linearly to the
//! content offset.

use glam::Vec2;

use super::font;
use crate::leaderboard::LeaderboardEntry;
use crate::platform::InputEvent;
use crate::renderer::{Surface, colors};
use crate::sim::Rect;

pub const ROW_HEIGHT: f32 = 80.0;
pub const ROW_PADDING: f32 = 1.0;
const BORDER: f32 = 3.0;
/// Width reserved on the right for the scrollbar
const SCROLLBAR_GUTTER: f32 = 36.0;
const THUMB_GAP: f32 = 10.0;
const THUMB_WIDTH: f32 = 20.0;
const THUMB_HEIGHT: f32 = 50.0;
const TEXT_SIZE: f32 = 28.0;

#[derive(Debug, Clone)]
pub struct LeaderboardsBox {
    rect: Rect,
    rows: Vec<LeaderboardEntry>,
    /// Thumb rect relative to the box's top-left corner
    thumb: Rect,
    dragging: bool,
    /// Pointer y minus thumb top at the moment the drag started
    grab_offset: f32,
    scroll_percent: f32,
    content_offset: f32,
}

impl LeaderboardsBox {
    pub fn new(rect: Rect) -> Self {
        let container_w = rect.w - SCROLLBAR_GUTTER;
        Self {
            rect,
            rows: Vec::new(),
            thumb: Rect::new(container_w + THUMB_GAP, 0.0, THUMB_WIDTH, THUMB_HEIGHT),
            dragging: false,
            grab_offset: 0.0,
            scroll_percent: 0.0,
            content_offset: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Visible viewport for the rows, in screen coordinates
    pub fn container(&self) -> Rect {
        Rect::new(
            self.rect.x + BORDER,
            self.rect.y + BORDER,
            self.rect.w - SCROLLBAR_GUTTER,
            self.rect.h - 2.0 * BORDER,
        )
    }

    /// Table height, never smaller than the viewport
    pub fn content_height(&self) -> f32 {
        let rows = (ROW_HEIGHT + ROW_PADDING) * self.rows.len() as f32;
        rows.max(self.container().h)
    }

    /// Thumb travel along the track; zero when the box is shorter than the thumb
    fn max_travel(&self) -> f32 {
        (self.rect.h - self.thumb.h).max(0.0)
    }

    pub fn rows(&self) -> &[LeaderboardEntry] {
        &self.rows
    }

    /// Replace the table content, keeping the scroll position
    pub fn set_rows(&mut self, rows: Vec<LeaderboardEntry>) {
        self.rows = rows;
        self.update_offset();
    }

    pub fn scroll_percent(&self) -> f32 {
        self.scroll_percent
    }

    /// Vertical offset applied to the table (zero or negative)
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    /// Thumb rect in screen coordinates
    pub fn thumb_rect(&self) -> Rect {
        self.thumb.translated(self.rect.pos())
    }

    /// Screen rect of a row at the current scroll position
    pub fn row_rect(&self, index: usize) -> Rect {
        let container = self.container();
        Rect::new(
            container.x,
            container.y + self.content_offset + index as f32 * (ROW_HEIGHT + ROW_PADDING),
            container.w,
            ROW_HEIGHT,
        )
    }

    fn update_offset(&mut self) {
        let overflow = self.content_height() - self.container().h;
        self.content_offset = -(overflow * self.scroll_percent) / 100.0;
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { pos, .. } if event.is_primary_down() && !self.dragging => {
                let thumb = self.thumb_rect();
                if thumb.contains(*pos) {
                    self.dragging = true;
                    self.grab_offset = pos.y - thumb.top();
                }
            }
            InputEvent::PointerUp { .. } if event.is_primary_up() && self.dragging => {
                self.dragging = false;
            }
            InputEvent::PointerMoved { pos } if self.dragging => {
                let max_travel = self.max_travel();
                self.thumb.y = (pos.y - self.rect.y - self.grab_offset).clamp(0.0, max_travel);
                self.scroll_percent = if max_travel > 0.0 {
                    self.thumb.y / max_travel * 100.0
                } else {
                    0.0
                };
                self.update_offset();
            }
            _ => {}
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, colors::WHITE);
        surface.stroke_rect(self.rect, BORDER, colors::BLACK);
        surface.fill_rect(self.thumb_rect(), colors::SCROLLBAR);

        let container = self.container();
        surface.push_clip(container);
        for (i, entry) in self.rows.iter().enumerate() {
            let row = self.row_rect(i);
            if !row.intersects(&container) {
                continue;
            }
            surface.stroke_rect(row, 1.0, colors::BLACK);

            let text_y = row.y + (ROW_HEIGHT - TEXT_SIZE) / 2.0;
            let rank = (i + 1).to_string();
            let rank_w = font::measure(&rank, TEXT_SIZE).x;
            surface.draw_text(&rank, Vec2::new(row.x + 10.0, text_y), TEXT_SIZE, colors::BLACK);

            let divider_x = row.x + rank_w + 30.0;
            surface.draw_line(
                Vec2::new(divider_x, row.y),
                Vec2::new(divider_x, row.y + ROW_HEIGHT - 1.0),
                3.0,
                colors::BLACK,
            );

            let name = format!("Player: {}", entry.name);
            let name_x = row.x + rank_w + 50.0;
            surface.draw_text(&name, Vec2::new(name_x, text_y), TEXT_SIZE, colors::BLACK);

            let score = format!("Score: {}", entry.score);
            let score_x = name_x + font::measure(&name, TEXT_SIZE).x + 50.0;
            surface.draw_text(&score, Vec2::new(score_x, text_y), TEXT_SIZE, colors::BLACK);
        }
        surface.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PointerButton;
    use crate::renderer::DrawList;

    fn board(rows: usize) -> LeaderboardsBox {
        let mut b = LeaderboardsBox::new(Rect::new(20.0, 80.0, 760.0, 500.0));
        b.set_rows(
            (0..rows)
                .map(|i| LeaderboardEntry::new(&format!("P{}", i), 1000 - i as u64))
                .collect(),
        );
        b
    }

    fn drag(b: &mut LeaderboardsBox, from_y: f32, to_y: f32) {
        let x = b.thumb_rect().center_x();
        b.handle_input(&InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos: Vec2::new(x, from_y),
        });
        b.handle_input(&InputEvent::PointerMoved {
            pos: Vec2::new(x, to_y),
        });
        b.handle_input(&InputEvent::PointerUp {
            button: PointerButton::Primary,
            pos: Vec2::new(x, to_y),
        });
    }

    #[test]
    fn test_layout() {
        let b = board(0);
        assert_eq!(b.container(), Rect::new(23.0, 83.0, 724.0, 494.0));
        assert_eq!(b.thumb_rect(), Rect::new(754.0, 80.0, 20.0, 50.0));
        // Empty table still fills the viewport
        assert_eq!(b.content_height(), 494.0);
    }

    #[test]
    fn test_drag_to_bottom_shows_last_row() {
        let mut b = board(10);
        let grab = b.thumb_rect().top() + 5.0;
        drag(&mut b, grab, 10_000.0);

        assert!(!b.dragging);
        assert_eq!(b.scroll_percent(), 100.0);
        assert_eq!(b.thumb_rect().bottom(), b.rect().bottom());

        let container = b.container();
        let last = b.row_rect(9);
        assert!(last.top() >= container.top());
        assert!(last.bottom() <= container.bottom());
        // No overscroll: the table bottom meets the viewport bottom
        assert_eq!(container.y + b.content_offset() + b.content_height(), container.bottom());
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut b = board(10);
        let grab = b.thumb_rect().top() + 20.0;
        drag(&mut b, grab, grab + 100.0);
        assert_eq!(b.thumb_rect().top(), 180.0);
        assert_eq!(b.scroll_percent(), 100.0 / 450.0 * 100.0);
    }

    #[test]
    fn test_drag_above_track_clamps_to_top() {
        let mut b = board(10);
        let grab = b.thumb_rect().top() + 5.0;
        drag(&mut b, grab, 300.0);
        let grab = b.thumb_rect().top() + 5.0;
        drag(&mut b, grab, -500.0);
        assert_eq!(b.scroll_percent(), 0.0);
        assert_eq!(b.content_offset(), 0.0);
    }

    #[test]
    fn test_press_off_thumb_does_not_drag() {
        let mut b = board(10);
        b.handle_input(&InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos: Vec2::new(100.0, 100.0),
        });
        assert!(!b.dragging);
        b.handle_input(&InputEvent::PointerMoved {
            pos: Vec2::new(100.0, 400.0),
        });
        assert_eq!(b.scroll_percent(), 0.0);
    }

    #[test]
    fn test_short_table_never_scrolls() {
        let mut b = board(3);
        let grab = b.thumb_rect().top() + 5.0;
        drag(&mut b, grab, 10_000.0);
        assert_eq!(b.scroll_percent(), 100.0);
        assert_eq!(b.content_offset(), 0.0);
    }

    #[test]
    fn test_render_rows() {
        let b = board(2);
        let mut dl = DrawList::new(Vec2::new(800.0, 600.0));
        b.render(&mut dl);
        assert!(dl.contains_text("Player: P0"));
        assert!(dl.contains_text("Score: 999"));
        assert!(dl.texts().any(|t| t == "2"));
    }

    #[test]
    fn test_box_shorter_than_thumb_does_not_scroll() {
        let mut b = LeaderboardsBox::new(Rect::new(20.0, 80.0, 300.0, 30.0));
        b.set_rows(vec![LeaderboardEntry::new("Ann", 10)]);
        let grab = b.thumb_rect().top() + 5.0;
        drag(&mut b, grab, 400.0);
        assert_eq!(b.thumb_rect().top(), 80.0);
        assert_eq!(b.scroll_percent(), 0.0);
    }
}
