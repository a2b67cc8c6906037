//! Leaderboard screen

use glam::Vec2;

use super::{Navigator, Scene, TitleScreen, Transition};
use crate::leaderboard::LeaderboardStore;
use crate::platform::{InputEvent, KeyState};
use crate::renderer::{Surface, colors};
use crate::settings::SharedSettings;
use crate::sim::Rect;
use crate::ui::{ButtonStyle, LeaderboardsBox, StandardButton};

const TITLE: &str = "Leaderboards";
const TITLE_POS: Vec2 = Vec2::new(320.0, 20.0);
const TITLE_SIZE: f32 = 40.0;

pub struct LeaderboardsScreen {
    settings: SharedSettings,
    table: LeaderboardsBox,
    main_menu: StandardButton,
    nav: Navigator,
}

impl LeaderboardsScreen {
    /// Reads the leaderboard file; an unreadable file shows an empty table
    pub fn new(settings: SharedSettings) -> Self {
        let store = LeaderboardStore::new(settings.borrow().leaderboard_path.clone());
        let board = store.load_or_empty();

        let mut table = LeaderboardsBox::new(Rect::new(20.0, 80.0, 760.0, 500.0));
        table.set_rows(board.sorted_desc());

        Self {
            settings,
            table,
            main_menu: StandardButton::new(Rect::new(20.0, 20.0, 280.0, 40.0), "Main Menu")
                .with_style(ButtonStyle::menu()),
            nav: Navigator::new(),
        }
    }

    pub fn table(&self) -> &LeaderboardsBox {
        &self.table
    }
}

impl Scene for LeaderboardsScreen {
    fn name(&self) -> &'static str {
        "LeaderboardsScreen"
    }

    fn handle_input(&mut self, event: &InputEvent, _keys: &KeyState) {
        self.table.handle_input(event);
        if self.main_menu.handle_event(event).clicked {
            self.nav.change_scene(TitleScreen::new(self.settings.clone()));
        }
    }

    fn update(&mut self, _game_time: u64) {}

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw_text(TITLE, TITLE_POS, TITLE_SIZE, colors::BLACK);
        self.table.render(surface);
        self.main_menu.render(surface);
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.nav.take()
    }
}
