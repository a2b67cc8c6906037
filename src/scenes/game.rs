//! The playing field
//!
//! Wraps a [`GameState`] and feeds it one [`tick`] per frame. Input is turned
//! into a [`TickInput`] according to the shared control mode; simulation
//! events become sound cues. Once the game reaches a terminal phase the
//! navigation buttons appear.

use glam::Vec2;

use super::{AddToLeaderboards, Navigator, Scene, TitleScreen, Transition};
use crate::audio::SoundEffect;
use crate::consts::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::platform::{InputEvent, Key, KeyState};
use crate::renderer::{Sprite, Surface, colors};
use crate::settings::{ControlMode, SharedSettings};
use crate::sim::{GameEvent, GamePhase, GameState, Rect, TickInput, tick};
use crate::ui::{ButtonStyle, StandardButton, font};

const HUD_SIZE: f32 = 20.0;
const HUD_Y: f32 = 10.0;
const HUD_MARGIN: f32 = 20.0;
const SPEED_LEVEL_X: f32 = 300.0;
const WIN_TEXT: &str = "You win!";
const WIN_SIZE: f32 = 64.0;
const FINAL_SCORE_SIZE: f32 = 32.0;
const MISS_LINE_WIDTH: f32 = 3.0;

fn overlay_button(y: f32, label: &str) -> StandardButton {
    let mut button = StandardButton::new(Rect::new(400.0, y, 60.0, 30.0), label)
        .with_style(ButtonStyle::menu())
        .centered();
    button.set_visible(false);
    button
}

pub struct GameScene {
    settings: SharedSettings,
    state: GameState,
    /// Last known pointer x, kept between frames
    pointer_x: Option<f32>,
    steer_left: bool,
    steer_right: bool,
    launch_requested: bool,
    sounds: Vec<SoundEffect>,
    main_menu: StandardButton,
    add_score: StandardButton,
    nav: Navigator,
}

impl GameScene {
    pub fn new(settings: SharedSettings, seed: u64) -> Self {
        Self {
            settings,
            state: GameState::new(seed, Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
            pointer_x: None,
            steer_left: false,
            steer_right: false,
            launch_requested: false,
            sounds: Vec::new(),
            main_menu: overlay_button(350.0, "Main Menu"),
            add_score: overlay_button(420.0, "Add to leaderboard"),
            nav: Navigator::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn control_mode(&self) -> ControlMode {
        self.settings.borrow().control_mode
    }

    fn tick_input(&self) -> TickInput {
        match self.control_mode() {
            ControlMode::Pointer => TickInput {
                pointer_x: self.pointer_x,
                launch: self.launch_requested,
                ..Default::default()
            },
            ControlMode::Keyboard => TickInput {
                steer_left: self.steer_left,
                steer_right: self.steer_right,
                launch: self.launch_requested,
                ..Default::default()
            },
        }
    }

    fn collect_sounds(&mut self) {
        for event in self.state.drain_events() {
            let sound = match event {
                GameEvent::WallHit => SoundEffect::WallHit,
                GameEvent::BlockDestroyed { .. } => SoundEffect::BlockHit,
                GameEvent::GameOver => SoundEffect::GameOver,
                GameEvent::Victory => SoundEffect::Victory,
                _ => continue,
            };
            self.sounds.push(sound);
        }
    }

    fn render_hud(&self, surface: &mut dyn Surface) {
        surface.draw_text(
            &format!("Score: {}", self.state.score),
            Vec2::new(HUD_MARGIN, HUD_Y),
            HUD_SIZE,
            colors::BLACK,
        );
        surface.draw_text(
            &format!("Speed Level: {}", self.state.speed_level()),
            Vec2::new(SPEED_LEVEL_X, HUD_Y),
            HUD_SIZE,
            colors::BLACK,
        );

        let lives = format!("Lives: {}", self.state.lives);
        let w = font::measure(&lives, HUD_SIZE).x;
        let x = surface.size().x - HUD_MARGIN - w;
        surface.draw_text(&lives, Vec2::new(x, HUD_Y), HUD_SIZE, colors::BLACK);
    }

    fn render_overlay(&self, surface: &mut dyn Surface) {
        let center_x = surface.size().x / 2.0;
        match self.state.phase {
            GamePhase::GameOver => {
                let banner = Sprite::GameOverBanner.size();
                surface.draw_sprite(
                    Sprite::GameOverBanner,
                    Vec2::new(center_x - banner.x / 2.0, 100.0),
                );
            }
            GamePhase::Victory => {
                let w = font::measure(WIN_TEXT, WIN_SIZE).x;
                surface.draw_text(
                    WIN_TEXT,
                    Vec2::new(center_x - w / 2.0, 150.0),
                    WIN_SIZE,
                    colors::BLACK,
                );
            }
            _ => return,
        }

        let score = format!("Your score: {}", self.state.score);
        let w = font::measure(&score, FINAL_SCORE_SIZE).x;
        surface.draw_text(
            &score,
            Vec2::new(center_x - w / 2.0, 280.0),
            FINAL_SCORE_SIZE,
            colors::BLACK,
        );
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "GameScene"
    }

    fn handle_input(&mut self, event: &InputEvent, keys: &KeyState) {
        if let InputEvent::PointerMoved { pos } = event {
            self.pointer_x = Some(pos.x);
        }
        self.steer_left = keys.is_held(Key::Left);
        self.steer_right = keys.is_held(Key::Right);

        if self.state.phase == GamePhase::NewGame
            && (event.is_key_press(Key::Space) || event.is_primary_down())
        {
            self.launch_requested = true;
        }

        if self.main_menu.handle_event(event).clicked {
            self.nav.change_scene(TitleScreen::new(self.settings.clone()));
        }
        if self.add_score.handle_event(event).clicked {
            self.nav.change_scene(AddToLeaderboards::new(
                self.settings.clone(),
                self.state.score,
            ));
        }
    }

    fn update(&mut self, game_time: u64) {
        let input = self.tick_input();
        tick(&mut self.state, &input, game_time);
        self.launch_requested = false;
        self.collect_sounds();

        let terminal = self.state.phase.is_terminal();
        if terminal != self.main_menu.is_visible() {
            self.main_menu.set_visible(terminal);
            self.add_score.set_visible(terminal);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        for block in &self.state.blocks {
            surface.draw_sprite(Sprite::Block(block.kind), block.rect.pos());
        }

        self.render_hud(surface);
        self.main_menu.render(surface);
        self.add_score.render(surface);
        self.render_overlay(surface);

        let line_y = self.state.paddle.rect.top() + 1.0;
        surface.draw_line(
            Vec2::new(0.0, line_y),
            Vec2::new(surface.size().x, line_y),
            MISS_LINE_WIDTH,
            colors::MISS_LINE,
        );
        surface.draw_sprite(Sprite::Paddle, self.state.paddle.rect.pos());
        surface.draw_sprite(Sprite::Ball, self.state.ball.rect.pos());
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.nav.take()
    }

    fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }
}
