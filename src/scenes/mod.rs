//! Scene system
//!
//! A scene owns one screen of the game: its input handling, per-frame update
//! and rendering. Scenes request navigation through their [`Navigator`]; the
//! [`SceneManager`] reads the request after `update` and swaps scenes at the
//! frame boundary.

pub mod add_score;
pub mod game;
pub mod help;
pub mod leaderboards;
pub mod title;

use std::fmt;

use crate::audio::SoundEffect;
use crate::platform::{InputEvent, KeyState};
use crate::renderer::Surface;

pub use add_score::AddToLeaderboards;
pub use game::GameScene;
pub use help::HelpScreen;
pub use leaderboards::LeaderboardsScreen;
pub use title::TitleScreen;

/// Requested navigation
pub enum Transition {
    /// Make this scene current from the next frame on
    Replace(Box<dyn Scene>),
    /// Leave the game (exit code 0)
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Replace(scene) => f.debug_tuple("Replace").field(&scene.name()).finish(),
            Transition::Quit => f.write_str("Quit"),
        }
    }
}

/// Pending "next scene" slot. Empty means stay; the last request wins.
#[derive(Debug, Default)]
pub struct Navigator {
    pending: Option<Transition>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn change_scene(&mut self, scene: impl Scene + 'static) {
        self.pending = Some(Transition::Replace(Box::new(scene)));
    }

    pub fn quit(&mut self) {
        self.pending = Some(Transition::Quit);
    }

    pub fn take(&mut self) -> Option<Transition> {
        self.pending.take()
    }
}

/// One screen of the game
pub trait Scene {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Called once per input event, in arrival order
    fn handle_input(&mut self, event: &InputEvent, keys: &KeyState);

    /// Called once per frame after all input; `game_time` is in ms
    fn update(&mut self, game_time: u64);

    fn render(&self, surface: &mut dyn Surface);

    /// Hand over the pending transition, if any
    fn take_transition(&mut self) -> Option<Transition>;

    /// Sound cues produced since the last call
    fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        Vec::new()
    }
}

/// What a frame produced for the driver
#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub quit: bool,
    /// Scene changed at the end of this frame
    pub switched: bool,
    pub sounds: Vec<SoundEffect>,
}

/// Owns the current scene and runs the per-frame protocol
pub struct SceneManager {
    current: Box<dyn Scene>,
}

impl SceneManager {
    pub fn new(initial: Box<dyn Scene>) -> Self {
        log::info!("Starting at scene {}", initial.name());
        Self { current: initial }
    }

    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// Dispatch every event, update once, then apply any requested transition
    pub fn frame(&mut self, events: &[InputEvent], keys: &KeyState, game_time: u64) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        for event in events {
            if *event == InputEvent::Quit {
                log::info!("Quit requested");
                outcome.quit = true;
                return outcome;
            }
            self.current.handle_input(event, keys);
        }

        self.current.update(game_time);
        outcome.sounds = self.current.drain_sounds();

        match self.current.take_transition() {
            Some(Transition::Replace(next)) => {
                log::info!("Scene {} -> {}", self.current.name(), next.name());
                self.current = next;
                outcome.switched = true;
            }
            Some(Transition::Quit) => {
                log::info!("Scene {} requested quit", self.current.name());
                outcome.quit = true;
            }
            None => {}
        }
        outcome
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.current.render(surface);
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use glam::Vec2;
    use tempfile::TempDir;

    use crate::platform::{InputEvent, KeyState, PointerButton};
    use crate::renderer::DrawList;
    use crate::scenes::Scene;
    use crate::settings::{Settings, SharedSettings};
    use crate::sim::Rect;

    /// Settings whose leaderboard lives in a fresh temp dir; the dir is
    /// removed when the returned guard drops
    pub fn settings() -> (SharedSettings, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let shared = Settings {
            leaderboard_path: dir.path().join("scores.json"),
            ..Settings::default()
        }
        .into_shared();
        (shared, dir)
    }

    /// Primary click (down + up) at the center of `rect`
    pub fn click(scene: &mut dyn Scene, rect: Rect) {
        let pos = rect.center();
        let keys = KeyState::new();
        scene.handle_input(&InputEvent::PointerMoved { pos }, &keys);
        scene.handle_input(
            &InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            },
            &keys,
        );
        scene.handle_input(
            &InputEvent::PointerUp {
                button: PointerButton::Primary,
                pos,
            },
            &keys,
        );
    }

    pub fn render(scene: &dyn Scene) -> DrawList {
        let mut dl = DrawList::new(Vec2::new(800.0, 600.0));
        scene.render(&mut dl);
        dl
    }

    #[test]
    fn test_settings_dir_removed_on_drop() {
        let (shared, dir) = settings();
        let path = shared.borrow().leaderboard_path.clone();
        crate::leaderboard::LeaderboardStore::new(path.clone())
            .append(crate::leaderboard::LeaderboardEntry::new("Tmp", 1))
            .unwrap();
        assert!(path.exists());

        let root = dir.path().to_path_buf();
        drop(dir);
        assert!(!path.exists());
        assert!(!root.exists());
    }
}
