//! Single-line text input

use glam::Vec2;

use super::font;
use crate::platform::{InputEvent, Key};
use crate::renderer::{Surface, colors};
use crate::sim::Rect;

const TEXT_SIZE: f32 = 24.0;
const PADDING: f32 = 5.0;
const BORDER: f32 = 3.0;
const CARET_WIDTH: f32 = 2.0;

/// Text box that hands back `action` when Enter is pressed while focused
#[derive(Debug, Clone)]
pub struct TextBox<A: Clone> {
    rect: Rect,
    text: String,
    focused: bool,
    /// Horizontal position of the text relative to the box's left edge
    scroll_offset: f32,
    enter_action: A,
}

impl<A: Clone> TextBox<A> {
    pub fn new(rect: Rect, enter_action: A) -> Self {
        Self {
            rect,
            text: String::new(),
            focused: false,
            scroll_offset: PADDING,
            enter_action,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Feed one input event; returns the enter action when Enter is pressed
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<A> {
        if let InputEvent::PointerDown { pos, .. } = event {
            if event.is_primary_down() {
                self.focused = self.rect.contains(*pos);
            }
        }
        if !self.focused {
            return None;
        }

        let InputEvent::KeyDown { key, .. } = event else {
            return None;
        };
        match key {
            Key::Enter => return Some(self.enter_action.clone()),
            Key::Backspace => {
                self.text.pop();
            }
            Key::Space => self.text.push(' '),
            Key::Char(c) if !c.is_control() => self.text.push(*c),
            _ => return None,
        }
        self.update_scroll();
        None
    }

    /// Keep the end of the text visible once it outgrows the box
    fn update_scroll(&mut self) {
        let text_w = font::measure(&self.text, TEXT_SIZE).x;
        self.scroll_offset = if text_w + 2.0 * PADDING > self.rect.w {
            self.rect.w - text_w - PADDING - CARET_WIDTH
        } else {
            PADDING
        };
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, colors::WHITE);

        let inner = Rect::new(
            self.rect.x + BORDER,
            self.rect.y + BORDER,
            self.rect.w - 2.0 * BORDER,
            self.rect.h - 2.0 * BORDER,
        );
        let text_pos = Vec2::new(
            self.rect.x + self.scroll_offset,
            self.rect.y + (self.rect.h - TEXT_SIZE) / 2.0,
        );
        surface.push_clip(inner);
        surface.draw_text(&self.text, text_pos, TEXT_SIZE, colors::BLACK);
        if self.focused {
            let caret_x = text_pos.x + font::measure(&self.text, TEXT_SIZE).x;
            surface.fill_rect(
                Rect::new(caret_x, text_pos.y, CARET_WIDTH, TEXT_SIZE),
                colors::BLACK,
            );
        }
        surface.pop_clip();

        let border = if self.focused { colors::FOCUS } else { colors::BLACK };
        surface.stroke_rect(self.rect, BORDER, border);
    }
}
