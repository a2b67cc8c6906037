//! Recording surface and tessellation
//!
//! `DrawList` stores the commands a scene issues during `render`, each tagged
//! with the clip rectangle active at the time. Tests inspect the commands;
//! the driver turns them into vertices with [`DrawList::tessellate`].

use glam::Vec2;

use super::shapes;
use super::vertex::{Color, Vertex, colors, rgb};
use super::{Sprite, Surface, block_color};
use crate::sim::{BlockKind, Rect};
use crate::ui::font;

/// Segments used for the ball circle
const BALL_SEGMENTS: u32 = 20;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, width: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Sprite { sprite: Sprite, pos: Vec2 },
    Text { text: String, pos: Vec2, size: f32, color: Color },
}

/// Surface that records draw commands
#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    items: Vec<(DrawCommand, Option<Rect>)>,
    clips: Vec<Rect>,
}

impl DrawList {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            items: Vec::new(),
            clips: Vec::new(),
        }
    }

    /// Drop recorded commands, keep the size
    pub fn clear(&mut self) {
        self.items.clear();
        self.clips.clear();
    }

    fn current_clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    fn record(&mut self, command: DrawCommand) {
        let clip = self.current_clip();
        self.items.push((command, clip));
    }

    /// Convert every recorded command into triangles, honouring clips.
    /// Circles are only dropped when entirely outside their clip.
    pub fn tessellate(&self) -> Vec<Vertex> {
        let mut out = Vec::new();
        for (command, clip) in &self.items {
            tessellate_command(command, clip.as_ref(), &mut out);
        }
        out
    }
}

/// Inspection helpers for scene tests
#[cfg(test)]
impl DrawList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.items.iter().map(|(cmd, _)| cmd)
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Every sprite drawn with its position
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, Vec2)> + '_ {
        self.commands().filter_map(|cmd| match cmd {
            DrawCommand::Sprite { sprite, pos } => Some((*sprite, *pos)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.record(DrawCommand::StrokeRect { rect, width, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.record(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        self.record(DrawCommand::Sprite { sprite, pos });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        self.record(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            size,
            color,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = match self.current_clip() {
            Some(outer) => outer
                .intersection(&rect)
                .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        self.clips.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }
}

fn push_rect(rect: Rect, color: Color, clip: Option<&Rect>, out: &mut Vec<Vertex>) {
    let visible = match clip {
        Some(clip) => match clip.intersection(&rect) {
            Some(r) => r,
            None => return,
        },
        None => rect,
    };
    if visible.w > 0.0 && visible.h > 0.0 {
        out.extend_from_slice(&shapes::quad(&visible, color));
    }
}

fn push_outline(rect: Rect, width: f32, color: Color, clip: Option<&Rect>, out: &mut Vec<Vertex>) {
    let w = width.min(rect.w / 2.0).min(rect.h / 2.0);
    if w <= 0.0 {
        return;
    }
    push_rect(Rect::new(rect.x, rect.y, rect.w, w), color, clip, out);
    push_rect(Rect::new(rect.x, rect.bottom() - w, rect.w, w), color, clip, out);
    push_rect(Rect::new(rect.x, rect.y + w, w, rect.h - 2.0 * w), color, clip, out);
    push_rect(
        Rect::new(rect.right() - w, rect.y + w, w, rect.h - 2.0 * w),
        color,
        clip,
        out,
    );
}

fn push_text(text: &str, pos: Vec2, size: f32, color: Color, clip: Option<&Rect>, out: &mut Vec<Vertex>) {
    font::for_each_run(text, pos, size, |run| push_rect(run, color, clip, out));
}

fn tessellate_command(command: &DrawCommand, clip: Option<&Rect>, out: &mut Vec<Vertex>) {
    match command {
        DrawCommand::FillRect { rect, color } => push_rect(*rect, *color, clip, out),
        DrawCommand::StrokeRect { rect, width, color } => {
            push_outline(*rect, *width, *color, clip, out)
        }
        DrawCommand::Line {
            from,
            to,
            width,
            color,
        } => match shapes::axis_line_rect(*from, *to, *width) {
            Some(rect) => push_rect(rect, *color, clip, out),
            None => out.extend(shapes::line(*from, *to, *width, *color)),
        },
        DrawCommand::Sprite { sprite, pos } => tessellate_sprite(*sprite, *pos, clip, out),
        DrawCommand::Text {
            text,
            pos,
            size,
            color,
        } => push_text(text, *pos, *size, *color, clip, out),
    }
}

fn tessellate_sprite(sprite: Sprite, pos: Vec2, clip: Option<&Rect>, out: &mut Vec<Vertex>) {
    let bounds = Rect::from_pos_size(pos, sprite.size());
    match sprite {
        Sprite::Block(kind) => {
            push_rect(bounds, block_color(kind), clip, out);
            if kind == BlockKind::Gold {
                let shine = Rect::new(bounds.x + 4.0, bounds.y + 3.0, bounds.w - 8.0, 3.0);
                push_rect(shine, colors::GOLD_SHINE, clip, out);
            }
            push_outline(bounds, 1.0, colors::BLOCK_EDGE, clip, out);
        }
        Sprite::Paddle => {
            push_rect(bounds, colors::PADDLE, clip, out);
            let highlight = Rect::new(bounds.x, bounds.y, bounds.w, 3.0);
            push_rect(highlight, rgb(130, 130, 145), clip, out);
        }
        Sprite::Ball => {
            if clip.is_some_and(|c| !c.intersects(&bounds)) {
                return;
            }
            out.extend(shapes::circle(
                bounds.center(),
                bounds.w / 2.0,
                colors::BALL,
                BALL_SEGMENTS,
            ));
        }
        Sprite::Logo => {
            // One letter per row color, then a striped underline
            let advance = font::measure("X", Sprite::LOGO_TEXT_SIZE).x;
            for (i, c) in Sprite::LOGO_TEXT.chars().enumerate() {
                let kind = BlockKind::GRID_ORDER[i % BlockKind::GRID_ORDER.len()];
                let letter_pos = Vec2::new(pos.x + i as f32 * advance, pos.y);
                let mut buf = [0u8; 4];
                push_text(
                    c.encode_utf8(&mut buf),
                    letter_pos,
                    Sprite::LOGO_TEXT_SIZE,
                    block_color(kind),
                    clip,
                    out,
                );
            }
            let stripe_y = pos.y + Sprite::LOGO_TEXT_SIZE + Sprite::LOGO_STRIPE_GAP;
            let stripe_w = bounds.w / BlockKind::GRID_ORDER.len() as f32;
            for (i, kind) in BlockKind::GRID_ORDER.iter().enumerate() {
                let stripe = Rect::new(
                    pos.x + i as f32 * stripe_w,
                    stripe_y,
                    stripe_w,
                    Sprite::LOGO_STRIPE_HEIGHT,
                );
                push_rect(stripe, block_color(*kind), clip, out);
            }
        }
        Sprite::GameOverBanner => push_text(
            Sprite::BANNER_TEXT,
            pos,
            Sprite::BANNER_TEXT_SIZE,
            colors::BLOCK_RED,
            clip,
            out,
        ),
    }
}
