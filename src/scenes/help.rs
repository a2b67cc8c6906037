//! Instructions screen shown before a game starts

use glam::Vec2;

use super::{GameScene, Navigator, Scene, Transition};
use crate::consts::{GOLD_INTERVAL_MS, SPEED_UP_1_MS, SPEED_UP_2_MS, STARTING_LIVES};
use crate::platform::{InputEvent, KeyState, seed_from_clock};
use crate::renderer::{Sprite, Surface, colors};
use crate::settings::SharedSettings;
use crate::sim::{BlockKind, Rect};
use crate::ui::{ButtonStyle, StandardButton, font};

const TEXT_SIZE: f32 = 16.0;
const TEXT_X: f32 = 20.0;
const FIRST_LINE_Y: f32 = 20.0;
const LINE_SPACING: f32 = 40.0;
/// Gap between a block value line and its sprite
const SPRITE_GAP: f32 = 20.0;

/// One line of the help text, optionally illustrated by a block sprite
struct HelpLine {
    text: String,
    block: Option<BlockKind>,
}

impl HelpLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            block: None,
        }
    }
}

fn help_lines() -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::plain("Welcome to Breakout"),
        HelpLine::plain("Bounce the ball off the paddle to break the blocks."),
        HelpLine::plain("Each block is worth points depending on its colour:"),
    ];
    for kind in BlockKind::GRID_ORDER.iter().rev() {
        lines.push(HelpLine {
            text: format!("{}: {}", kind.as_str(), kind.points()),
            block: Some(*kind),
        });
    }
    lines.push(HelpLine {
        text: format!(
            "Every {} seconds a gold block appears: {} points!",
            GOLD_INTERVAL_MS / 1000,
            BlockKind::Gold.points()
        ),
        block: Some(BlockKind::Gold),
    });
    lines.push(HelpLine::plain(format!(
        "The ball speeds up after {} and again after {} min.",
        SPEED_UP_1_MS / 60_000,
        SPEED_UP_2_MS / 60_000
    )));
    lines.push(HelpLine::plain(format!(
        "Keep the ball off the red line! You have {} lives.",
        STARTING_LIVES
    )));
    lines.push(HelpLine::plain("Press space or left click to launch the ball."));
    lines
}

pub struct HelpScreen {
    settings: SharedSettings,
    lines: Vec<HelpLine>,
    start: StandardButton,
    nav: Navigator,
}

impl HelpScreen {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            settings,
            lines: help_lines(),
            start: StandardButton::new(Rect::new(400.0, 500.0, 60.0, 30.0), "Start!")
                .with_style(ButtonStyle::menu())
                .centered(),
            nav: Navigator::new(),
        }
    }
}

impl Scene for HelpScreen {
    fn name(&self) -> &'static str {
        "HelpScreen"
    }

    fn handle_input(&mut self, event: &InputEvent, _keys: &KeyState) {
        if self.start.handle_event(event).clicked {
            let seed = seed_from_clock();
            log::info!("Starting new game (seed {})", seed);
            self.nav
                .change_scene(GameScene::new(self.settings.clone(), seed));
        }
    }

    fn update(&mut self, _game_time: u64) {}

    fn render(&self, surface: &mut dyn Surface) {
        for (i, line) in self.lines.iter().enumerate() {
            let y = FIRST_LINE_Y + i as f32 * LINE_SPACING;
            surface.draw_text(&line.text, Vec2::new(TEXT_X, y), TEXT_SIZE, colors::BLACK);

            if let Some(kind) = line.block {
                let sprite = Sprite::Block(kind);
                let text_w = font::measure(&line.text, TEXT_SIZE).x;
                let size = sprite.size();
                let pos = Vec2::new(
                    TEXT_X + text_w + SPRITE_GAP,
                    y + TEXT_SIZE / 2.0 - size.y / 2.0,
                );
                surface.draw_sprite(sprite, pos);
            }
        }
        self.start.render(surface);
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.nav.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::test_util::{click, render, settings};

    #[test]
    fn test_lists_every_block_value() {
        let (shared, _dir) = settings();
        let scene = HelpScreen::new(shared);
        let dl = render(&scene);
        for text in ["Purple: 10", "Blue: 20", "Green: 30", "Yellow: 40", "Red: 50"] {
            assert!(dl.texts().any(|t| t == text), "missing {}", text);
        }
        assert!(dl.contains_text("100 points"));

        let sprites: Vec<_> = dl.sprites().map(|(s, _)| s).collect();
        assert_eq!(sprites.len(), 6);
        assert!(sprites.contains(&Sprite::Block(BlockKind::Gold)));
    }

    #[test]
    fn test_text_fits_on_screen() {
        let (shared, _dir) = settings();
        let scene = HelpScreen::new(shared);
        for line in &scene.lines {
            let right = TEXT_X + font::measure(&line.text, TEXT_SIZE).x;
            assert!(right <= 800.0, "{} overflows", line.text);
        }
        let last_y = FIRST_LINE_Y + (scene.lines.len() - 1) as f32 * LINE_SPACING;
        assert!(last_y + TEXT_SIZE < scene.start.rect().top());
    }

    #[test]
    fn test_start_opens_game() {
        let (shared, _dir) = settings();
        let mut scene = HelpScreen::new(shared);
        let rect = scene.start.rect();
        click(&mut scene, rect);
        match scene.take_transition() {
            Some(Transition::Replace(next)) => assert_eq!(next.name(), "GameScene"),
            other => panic!("unexpected transition {:?}", other),
        }
    }
}
