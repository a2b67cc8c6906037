//! Push buttons and toggle buttons
//!
//! Buttons react only to pointer events. Each call to `handle_event`
//! reports what happened as a [`ButtonEvents`] set; scenes act on `clicked`.

use glam::Vec2;

use super::font;
use crate::platform::InputEvent;
use crate::renderer::{Color, Surface, colors};
use crate::sim::Rect;

/// Horizontal room kept around the label before the button grows
const LABEL_MARGIN_X: f32 = 50.0;
/// Vertical room added to the label height when the button grows
const LABEL_MARGIN_Y: f32 = 5.0;

/// What a single pointer event did to a button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEvents {
    pub entered: bool,
    pub moved: bool,
    pub pressed: bool,
    pub released: bool,
    pub clicked: bool,
    pub exited: bool,
}

impl ButtonEvents {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Visual interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hovered,
    Pressed,
}

/// Color scheme and label size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub foreground: Color,
    /// Background while hovered
    pub highlight: Color,
    pub font_size: f32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: colors::LIGHT_GREY,
            foreground: colors::BLACK,
            highlight: colors::GREY,
            font_size: 20.0,
        }
    }
}

impl ButtonStyle {
    /// Large menu buttons
    pub fn menu() -> Self {
        Self {
            font_size: 32.0,
            ..Self::default()
        }
    }
}

/// Final button rect for a requested rect and label size.
///
/// With `center_x` the requested x is the button's horizontal center. When
/// the label does not fit, the button widens to fit the label around its
/// center and takes the label height; its top stays put.
fn layout(requested: Rect, label: Vec2, center_x: bool) -> Rect {
    let mut rect = requested;
    if center_x {
        rect.x = requested.x - requested.w / 2.0;
    }
    if label.x >= rect.w - LABEL_MARGIN_X {
        let center_x = rect.center_x();
        rect.w = label.x + LABEL_MARGIN_X;
        rect.h = label.y + LABEL_MARGIN_Y;
        rect.set_center_x(center_x);
    }
    rect
}

/// A clickable, labelled rectangle
#[derive(Debug, Clone)]
pub struct StandardButton {
    /// Rect as requested by the owner, before layout
    requested: Rect,
    rect: Rect,
    label: String,
    style: ButtonStyle,
    center_x: bool,
    visible: bool,
    // Pointer tracking
    button_down: bool,
    mouse_over: bool,
    last_press_on_button: bool,
}

impl StandardButton {
    pub fn new(rect: Rect, label: &str) -> Self {
        let mut button = Self {
            requested: rect,
            rect,
            label: label.to_owned(),
            style: ButtonStyle::default(),
            center_x: false,
            visible: true,
            button_down: false,
            mouse_over: false,
            last_press_on_button: false,
        };
        button.relayout();
        button
    }

    /// Treat the requested x as the horizontal center
    pub fn centered(mut self) -> Self {
        self.center_x = true;
        self.relayout();
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self.relayout();
        self
    }

    fn relayout(&mut self) {
        let label = font::measure(&self.label, self.style.font_size);
        self.rect = layout(self.requested, label, self.center_x);
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Relabel; the button grows to fit a longer label but never shrinks
    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_owned();
        let size = font::measure(&self.label, self.style.font_size);
        let grown = layout(self.requested, size, self.center_x);
        if grown.w > self.rect.w {
            self.rect = grown;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden buttons ignore input and forget any hover/press in progress
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.button_down = false;
            self.mouse_over = false;
            self.last_press_on_button = false;
        }
    }

    pub fn state(&self) -> ButtonState {
        if self.button_down {
            ButtonState::Pressed
        } else if self.mouse_over {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        }
    }

    /// Feed one input event; non-pointer events are ignored
    pub fn handle_event(&mut self, event: &InputEvent) -> ButtonEvents {
        let mut events = ButtonEvents::default();
        if !self.visible {
            return events;
        }
        let Some(pos) = event.pointer_pos() else {
            return events;
        };

        let inside = self.rect.contains(pos);
        let mut exited = false;
        if !self.mouse_over && inside {
            self.mouse_over = true;
            events.entered = true;
        } else if self.mouse_over && !inside {
            self.mouse_over = false;
            exited = true;
        }

        let primary_down = event.is_primary_down();
        let primary_up = event.is_primary_up();

        if inside {
            if matches!(event, InputEvent::PointerMoved { .. }) {
                events.moved = true;
            } else if primary_down {
                self.button_down = true;
                self.last_press_on_button = true;
                events.pressed = true;
            }
        } else if primary_down || primary_up {
            // A press or release off the button cancels a pending click
            self.last_press_on_button = false;
        }

        // Release is handled wherever the pointer is
        if primary_up {
            let click = self.last_press_on_button;
            self.last_press_on_button = false;

            if self.button_down {
                self.button_down = false;
                events.released = true;
            }
            events.clicked = click;
        }

        events.exited = exited;
        events
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        let state = self.state();
        let background = match state {
            ButtonState::Hovered => self.style.highlight,
            _ => self.style.background,
        };
        surface.fill_rect(self.rect, background);

        let label = font::measure(&self.label, self.style.font_size);
        let pos = self.rect.center() - label / 2.0;
        surface.draw_text(&self.label, pos, self.style.font_size, self.style.foreground);

        let border = if state == ButtonState::Pressed { 3.0 } else { 1.0 };
        surface.stroke_rect(self.rect, border, colors::BLACK);
    }
}

/// Button with an on/off state shown as "{label}: {state text}"
#[derive(Debug, Clone)]
pub struct ToggleButton {
    button: StandardButton,
    label: String,
    on_text: String,
    off_text: String,
    state: bool,
}

impl ToggleButton {
    pub fn new(rect: Rect, label: &str, on_text: &str, off_text: &str, state: bool) -> Self {
        let mut toggle = Self {
            button: StandardButton::new(rect, label),
            label: label.to_owned(),
            on_text: on_text.to_owned(),
            off_text: off_text.to_owned(),
            state,
        };
        toggle.refresh_label();
        toggle
    }

    pub fn centered(mut self) -> Self {
        self.button = self.button.centered();
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.button = self.button.with_style(style);
        self
    }

    fn refresh_label(&mut self) {
        let text = format!("{}: {}", self.label, self.state_text());
        self.button.set_label(&text);
    }

    pub fn state(&self) -> bool {
        self.state
    }

    pub fn state_text(&self) -> &str {
        if self.state { &self.on_text } else { &self.off_text }
    }

    pub fn label(&self) -> &str {
        self.button.label()
    }

    pub fn rect(&self) -> Rect {
        self.button.rect()
    }

    /// A click flips the state before the events are returned
    pub fn handle_event(&mut self, event: &InputEvent) -> ButtonEvents {
        let events = self.button.handle_event(event);
        if events.clicked {
            self.state = !self.state;
            self.refresh_label();
        }
        events
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.button.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PointerButton;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved {
            pos: Vec2::new(x, y),
        }
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos: Vec2::new(x, y),
        }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            pos: Vec2::new(x, y),
        }
    }

    /// 200x40 button at (100, 100) whose label fits
    fn button() -> StandardButton {
        StandardButton::new(Rect::new(100.0, 100.0, 200.0, 40.0), "OK")
    }

    #[test]
    fn test_click_inside() {
        let mut b = button();
        let enter = b.handle_event(&moved(150.0, 120.0));
        assert!(enter.entered && enter.moved);
        assert_eq!(b.state(), ButtonState::Hovered);

        let press = b.handle_event(&down(150.0, 120.0));
        assert!(press.pressed && !press.clicked);
        assert_eq!(b.state(), ButtonState::Pressed);

        let release = b.handle_event(&up(150.0, 120.0));
        assert!(release.released && release.clicked);
        assert_eq!(b.state(), ButtonState::Hovered);
    }

    #[test]
    fn test_press_inside_release_outside_is_not_click() {
        let mut b = button();
        b.handle_event(&down(150.0, 120.0));
        let release = b.handle_event(&up(500.0, 500.0));
        assert!(release.released);
        assert!(!release.clicked);
        assert!(release.exited);
    }

    #[test]
    fn test_press_outside_release_inside_is_not_click() {
        let mut b = button();
        b.handle_event(&down(10.0, 10.0));
        let release = b.handle_event(&up(150.0, 120.0));
        assert!(release.entered);
        assert!(!release.clicked);
        assert!(!release.released);
    }

    #[test]
    fn test_leaving_and_returning_still_clicks() {
        let mut b = button();
        b.handle_event(&down(150.0, 120.0));
        assert!(b.handle_event(&moved(500.0, 500.0)).exited);
        assert!(b.handle_event(&moved(150.0, 120.0)).entered);
        assert!(b.handle_event(&up(150.0, 120.0)).clicked);
    }

    #[test]
    fn test_secondary_button_does_not_press() {
        let mut b = button();
        let events = b.handle_event(&InputEvent::PointerDown {
            button: PointerButton::Secondary,
            pos: Vec2::new(150.0, 120.0),
        });
        assert!(events.entered);
        assert!(!events.pressed);
    }

    #[test]
    fn test_hidden_and_non_pointer_events_are_ignored() {
        let mut b = button();
        assert!(b.handle_event(&InputEvent::Quit).is_empty());
        b.set_visible(false);
        assert!(b.handle_event(&down(150.0, 120.0)).is_empty());
        assert!(b.handle_event(&up(150.0, 120.0)).is_empty());
    }

    #[test]
    fn test_auto_resize_recenters() {
        // 60 wide requested at center x = 400; the label needs more room
        let b = StandardButton::new(Rect::new(400.0, 250.0, 60.0, 30.0), "Leaderboard")
            .with_style(ButtonStyle::menu())
            .centered();
        let label = font::measure("Leaderboard", 32.0);
        let rect = b.rect();
        assert_eq!(rect.w, label.x + 50.0);
        assert_eq!(rect.h, label.y + 5.0);
        assert_eq!(rect.center_x(), 400.0);
        assert_eq!(rect.y, 250.0);
    }

    #[test]
    fn test_no_resize_when_label_fits() {
        let b = button();
        assert_eq!(b.rect(), Rect::new(100.0, 100.0, 200.0, 40.0));
    }

    #[test]
    fn test_relabel_grows_but_never_shrinks() {
        let mut b = StandardButton::new(Rect::new(400.0, 250.0, 60.0, 30.0), "Short")
            .with_style(ButtonStyle::menu())
            .centered();
        let short = b.rect();

        b.set_label("A much longer label");
        let long = b.rect();
        assert!(long.w > short.w);
        assert_eq!(long.center_x(), 400.0);

        b.set_label("Short");
        assert_eq!(b.rect(), long);
    }

    #[test]
    fn test_toggle_flips_and_relabels() {
        let mut t = ToggleButton::new(Rect::new(400.0, 390.0, 60.0, 30.0), "Controls", "Mouse", "Keyboard", true)
            .with_style(ButtonStyle::menu())
            .centered();
        assert_eq!(t.label(), "Controls: Mouse");
        let center = t.rect().center_x();

        let inside = t.rect().center();
        t.handle_event(&down(inside.x, inside.y));
        let events = t.handle_event(&up(inside.x, inside.y));
        assert!(events.clicked);
        assert!(!t.state());
        assert_eq!(t.label(), "Controls: Keyboard");
        // Relabel keeps the button centered where it was requested
        assert_eq!(t.rect().center_x(), center);
    }

    #[test]
    fn test_toggle_width_survives_round_trip() {
        let mut t = ToggleButton::new(Rect::new(400.0, 390.0, 60.0, 30.0), "Controls", "Mouse", "Keyboard", true)
            .with_style(ButtonStyle::menu())
            .centered();
        let mouse_w = t.rect().w;
        let keyboard_w = font::measure("Controls: Keyboard", 32.0).x + LABEL_MARGIN_X;
        assert!(keyboard_w > mouse_w);

        let inside = t.rect().center();
        for _ in 0..2 {
            t.handle_event(&down(inside.x, inside.y));
            t.handle_event(&up(inside.x, inside.y));
            assert_eq!(t.rect().w, keyboard_w);
        }
        // Back on "Mouse" with the wider rect still in place
        assert!(t.state());
        assert_eq!(t.rect().center_x(), 400.0);
    }

    #[test]
    fn test_render_reflects_state() {
        use crate::renderer::{DrawCommand, DrawList};

        let mut b = button();
        b.handle_event(&down(150.0, 120.0));
        let mut dl = DrawList::new(Vec2::new(800.0, 600.0));
        b.render(&mut dl);
        assert!(dl.contains_text("OK"));
        assert!(dl.commands().any(|c| matches!(c, DrawCommand::StrokeRect { width, .. } if *width == 3.0)));

        b.set_visible(false);
        dl.clear();
        b.render(&mut dl);
        assert!(dl.is_empty());
    }
}
