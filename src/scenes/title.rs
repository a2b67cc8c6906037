//! Title screen: logo and the main menu

use glam::Vec2;

use super::{HelpScreen, LeaderboardsScreen, Navigator, Scene, Transition};
use crate::platform::{InputEvent, KeyState};
use crate::renderer::{Sprite, Surface};
use crate::settings::{ControlMode, SharedSettings};
use crate::sim::Rect;
use crate::ui::{ButtonStyle, StandardButton, ToggleButton};

const LOGO_Y: f32 = 10.0;

fn menu_button(y: f32, label: &str) -> StandardButton {
    StandardButton::new(Rect::new(400.0, y, 60.0, 30.0), label)
        .with_style(ButtonStyle::menu())
        .centered()
}

pub struct TitleScreen {
    settings: SharedSettings,
    play: StandardButton,
    leaderboard: StandardButton,
    controls: ToggleButton,
    quit: StandardButton,
    nav: Navigator,
}

impl TitleScreen {
    pub fn new(settings: SharedSettings) -> Self {
        let pointer = settings.borrow().control_mode == ControlMode::Pointer;
        let controls = ToggleButton::new(
            Rect::new(400.0, 390.0, 60.0, 30.0),
            "Controls",
            ControlMode::Pointer.as_str(),
            ControlMode::Keyboard.as_str(),
            pointer,
        )
        .with_style(ButtonStyle::menu())
        .centered();

        Self {
            settings,
            play: menu_button(250.0, "Play"),
            leaderboard: menu_button(320.0, "Leaderboard"),
            controls,
            quit: menu_button(460.0, "Quit"),
            nav: Navigator::new(),
        }
    }
}

impl Scene for TitleScreen {
    fn name(&self) -> &'static str {
        "TitleScreen"
    }

    fn handle_input(&mut self, event: &InputEvent, _keys: &KeyState) {
        if self.play.handle_event(event).clicked {
            self.nav.change_scene(HelpScreen::new(self.settings.clone()));
        }
        if self.controls.handle_event(event).clicked {
            let mode = if self.controls.state() {
                ControlMode::Pointer
            } else {
                ControlMode::Keyboard
            };
            self.settings.borrow_mut().control_mode = mode;
            log::info!("Control mode set to {}", mode.as_str());
        }
        if self.leaderboard.handle_event(event).clicked {
            self.nav
                .change_scene(LeaderboardsScreen::new(self.settings.clone()));
        }
        if self.quit.handle_event(event).clicked {
            self.nav.quit();
        }
    }

    fn update(&mut self, _game_time: u64) {}

    fn render(&self, surface: &mut dyn Surface) {
        let logo = Sprite::Logo.size();
        let x = surface.size().x / 2.0 - logo.x / 2.0;
        surface.draw_sprite(Sprite::Logo, Vec2::new(x, LOGO_Y));

        self.play.render(surface);
        self.leaderboard.render(surface);
        self.controls.render(surface);
        self.quit.render(surface);
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.nav.take()
    }
}
