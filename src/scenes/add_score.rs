//! Score entry screen shown after a finished game

use glam::Vec2;

use super::{LeaderboardsScreen, Navigator, Scene, Transition};
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore};
use crate::platform::{InputEvent, KeyState};
use crate::renderer::{Surface, colors};
use crate::settings::SharedSettings;
use crate::sim::Rect;
use crate::ui::{ButtonStyle, StandardButton, TextBox, font};

const TITLE: &str = "Add your score!";
const TITLE_SIZE: f32 = 40.0;
const TEXT_SIZE: f32 = 24.0;
const HINT_SIZE: f32 = 16.0;

/// Action bound to Enter in the name box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameAction {
    Submit,
}

pub struct AddToLeaderboards {
    settings: SharedSettings,
    store: LeaderboardStore,
    score: u64,
    /// Rank on the board as it was when the screen opened
    rank: usize,
    name: TextBox<NameAction>,
    add: StandardButton,
    submitted: bool,
    nav: Navigator,
}

impl AddToLeaderboards {
    pub fn new(settings: SharedSettings, score: u64) -> Self {
        let store = LeaderboardStore::new(settings.borrow().leaderboard_path.clone());
        let rank = store.load_or_empty().potential_rank(score);
        let mut name = TextBox::new(Rect::new(300.0, 200.0, 200.0, 45.0), NameAction::Submit);
        name.set_focused(true);

        Self {
            settings,
            store,
            score,
            rank,
            name,
            add: StandardButton::new(Rect::new(400.0, 350.0, 60.0, 30.0), "Add score")
                .with_style(ButtonStyle::menu())
                .centered(),
            submitted: false,
            nav: Navigator::new(),
        }
    }

    /// Append the entry, then show the leaderboard. A failed write is logged
    /// and the board shows whatever is on disk.
    fn submit(&mut self) {
        if self.submitted {
            return;
        }
        self.submitted = true;

        let entry = LeaderboardEntry::new(self.name.text(), self.score);
        log::info!("Adding {} with {} to the leaderboard", entry.name, entry.score);
        if let Err(err) = self.store.append(entry) {
            log::error!("Failed to save leaderboard: {}", err);
        }
        self.nav
            .change_scene(LeaderboardsScreen::new(self.settings.clone()));
    }
}

fn draw_centered(surface: &mut dyn Surface, text: &str, y: f32, size: f32) {
    let w = font::measure(text, size).x;
    let x = surface.size().x / 2.0 - w / 2.0;
    surface.draw_text(text, Vec2::new(x, y), size, colors::BLACK);
}

impl Scene for AddToLeaderboards {
    fn name(&self) -> &'static str {
        "AddToLeaderboards"
    }

    fn handle_input(&mut self, event: &InputEvent, _keys: &KeyState) {
        if let Some(NameAction::Submit) = self.name.handle_input(event) {
            self.submit();
        }
        if self.add.handle_event(event).clicked {
            self.submit();
        }
    }

    fn update(&mut self, _game_time: u64) {}

    fn render(&self, surface: &mut dyn Surface) {
        draw_centered(surface, TITLE, 20.0, TITLE_SIZE);
        draw_centered(surface, &format!("Score: {}", self.score), 100.0, TEXT_SIZE);
        draw_centered(
            surface,
            &format!("This score would rank #{}", self.rank),
            140.0,
            HINT_SIZE,
        );

        self.name.render(surface);
        let label = "Name:";
        let label_w = font::measure(label, TEXT_SIZE).x;
        let field = self.name.rect();
        surface.draw_text(
            label,
            Vec2::new(field.x - label_w - 10.0, field.y + (field.h - TEXT_SIZE) / 2.0),
            TEXT_SIZE,
            colors::BLACK,
        );

        self.add.render(surface);
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.nav.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;
    use crate::scenes::test_util::{click, render, settings};

    fn type_name(scene: &mut AddToLeaderboards, name: &str) {
        let keys = KeyState::new();
        for c in name.chars() {
            scene.handle_input(
                &InputEvent::KeyDown {
                    key: Key::Char(c),
                    repeat: false,
                },
                &keys,
            );
        }
    }

    fn stored(shared: &SharedSettings) -> Vec<LeaderboardEntry> {
        LeaderboardStore::new(shared.borrow().leaderboard_path.clone())
            .load_or_empty()
            .entries
    }

    #[test]
    fn test_enter_submits_and_shows_board() {
        let (shared, _dir) = settings();
        let mut scene = AddToLeaderboards::new(shared.clone(), 1230);
        type_name(&mut scene, "Ann");
        scene.handle_input(
            &InputEvent::KeyDown {
                key: Key::Enter,
                repeat: false,
            },
            &KeyState::new(),
        );

        assert_eq!(stored(&shared), vec![LeaderboardEntry::new("Ann", 1230)]);
        match scene.take_transition() {
            Some(Transition::Replace(next)) => assert_eq!(next.name(), "LeaderboardsScreen"),
            other => panic!("unexpected transition {:?}", other),
        }
    }

    #[test]
    fn test_button_submits_once() {
        let (shared, _dir) = settings();
        let mut scene = AddToLeaderboards::new(shared.clone(), 50);
        let rect = scene.add.rect();
        click(&mut scene, rect);
        click(&mut scene, rect);

        // Empty name falls back to the default
        let entries = stored(&shared);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, crate::leaderboard::DEFAULT_NAME);
    }

    #[test]
    fn test_appends_to_existing_board() {
        let (shared, _dir) = settings();
        let store = LeaderboardStore::new(shared.borrow().leaderboard_path.clone());
        store.append(LeaderboardEntry::new("Old", 500)).unwrap();

        let mut scene = AddToLeaderboards::new(shared.clone(), 700);
        assert_eq!(scene.rank, 1);
        assert!(render(&scene).contains_text("rank #1"));
        let rect = scene.add.rect();
        click(&mut scene, rect);
        assert_eq!(stored(&shared).len(), 2);
    }

    #[test]
    fn test_renders_score() {
        let (shared, _dir) = settings();
        let scene = AddToLeaderboards::new(shared, 360);
        let dl = render(&scene);
        assert!(dl.contains_text("Score: 360"));
        assert!(dl.contains_text(TITLE));
    }
}
