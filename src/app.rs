//! Native driver
//!
//! Owns the window, the wgpu renderer, audio and the scene manager. Raw
//! window events are translated into [`InputEvent`]s and queued; once per
//! frame the queue is handed to the current scene, sounds are played and the
//! scene is recorded into a [`DrawList`] that the next redraw uploads.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowId};

use crate::audio::AudioManager;
use crate::consts::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_RATE, WINDOW_TITLE};
use crate::error::AppError;
use crate::platform::{FrameClock, InputEvent, Key, KeyState, PointerButton};
use crate::renderer::{DrawList, RenderState, Surface, colors};
use crate::scenes::{SceneManager, TitleScreen};
use crate::settings::{Settings, SharedSettings};

const FPS_TEXT_SIZE: f32 = 16.0;
const FPS_POS: Vec2 = Vec2::new(4.0, 4.0);

/// Map a winit logical key to a game key
fn translate_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::Space => Some(Key::Space),
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Escape => Some(Key::Escape),
            NamedKey::Tab => Some(Key::Tab),
            _ => None,
        },
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Some(Key::Space),
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

/// Physical cursor position to logical display coordinates
fn to_logical(pos: PhysicalPosition<f64>, window: PhysicalSize<u32>) -> Vec2 {
    let w = window.width.max(1) as f32;
    let h = window.height.max(1) as f32;
    Vec2::new(
        pos.x as f32 / w * DISPLAY_WIDTH,
        pos.y as f32 / h * DISPLAY_HEIGHT,
    )
}

pub struct App {
    settings: SharedSettings,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    scenes: SceneManager,
    audio: AudioManager,
    clock: FrameClock,
    keys: KeyState,
    /// Events received since the last frame
    pending: Vec<InputEvent>,
    pointer: Vec2,
    /// Latest recorded frame, drawn on redraw
    frame: DrawList,
    /// Fatal error that ended the event loop
    error: Option<AppError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.into_shared();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings.borrow());
        let scenes = SceneManager::new(Box::new(TitleScreen::new(settings.clone())));

        Self {
            settings,
            window: None,
            render_state: None,
            scenes,
            audio,
            clock: FrameClock::new(FRAME_RATE, Instant::now()),
            keys: KeyState::new(),
            pending: Vec::new(),
            pointer: Vec2::ZERO,
            frame: DrawList::new(Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(DISPLAY_WIDTH as f64, DISPLAY_HEIGHT as f64))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
            Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        ))?;

        self.window = Some(window);
        self.render_state = Some(render_state);
        self.clock = FrameClock::new(FRAME_RATE, Instant::now());
        log::info!("Starting event loop...");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Shutting down from {}", self.scenes.current_name());
        self.audio.stop_all();
        self.settings.borrow().save();
        event_loop.exit();
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let Some(key) = translate_key(&event.logical_key) else {
            return;
        };
        let input = match event.state {
            ElementState::Pressed => {
                if key == Key::Char('1') && !event.repeat {
                    let mut settings = self.settings.borrow_mut();
                    settings.show_fps = !settings.show_fps;
                    log::info!("FPS overlay {}", if settings.show_fps { "on" } else { "off" });
                }
                InputEvent::KeyDown {
                    key,
                    repeat: event.repeat,
                }
            }
            ElementState::Released => InputEvent::KeyUp { key },
        };
        self.keys.apply(&input);
        self.pending.push(input);
    }

    /// Dispatch queued input, update the scene and record its frame
    fn run_frame(&mut self, event_loop: &ActiveEventLoop, now: Instant) {
        let game_time = self.clock.begin_frame(now);
        let events = std::mem::take(&mut self.pending);
        let outcome = self.scenes.frame(&events, &self.keys, game_time);

        for sound in outcome.sounds {
            self.audio.play(sound);
        }
        if outcome.quit {
            self.shutdown(event_loop);
            return;
        }

        self.frame.clear();
        self.scenes.render(&mut self.frame);
        if self.settings.borrow().show_fps {
            let text = format!("FPS: {}", self.clock.fps());
            self.frame
                .draw_text(&text, FPS_POS, FPS_TEXT_SIZE, colors::DARK_GREY);
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        let vertices = self.frame.tessellate();
        match render_state.render(&vertices, colors::BACKGROUND) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, AppError::OutOfMemory);
            }
            Err(err) => log::warn!("Skipping frame: {:?}", err),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init_graphics(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.pending.push(InputEvent::Quit);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = to_logical(position, window.inner_size());
                self.pending.push(InputEvent::PointerMoved { pos: self.pointer });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = translate_button(button);
                let pos = self.pointer;
                self.pending.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown { button, pos },
                    ElementState::Released => InputEvent::PointerUp { button, pos },
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() || event_loop.exiting() {
            return;
        }
        let now = Instant::now();
        if self.clock.is_due(now) {
            self.run_frame(event_loop, now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame()));
    }
}

/// Load settings, open the window and run until quit
pub fn run() -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(Settings::load());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_named_keys() {
        assert_eq!(translate_key(&WinitKey::Named(NamedKey::ArrowLeft)), Some(Key::Left));
        assert_eq!(translate_key(&WinitKey::Named(NamedKey::Space)), Some(Key::Space));
        assert_eq!(translate_key(&WinitKey::Named(NamedKey::Enter)), Some(Key::Enter));
        assert_eq!(translate_key(&WinitKey::Named(NamedKey::F1)), None);
    }

    #[test]
    fn test_translate_characters() {
        assert_eq!(translate_key(&WinitKey::Character("a".into())), Some(Key::Char('a')));
        assert_eq!(translate_key(&WinitKey::Character(" ".into())), Some(Key::Space));
        // Composed multi-character input is dropped
        assert_eq!(translate_key(&WinitKey::Character("ab".into())), None);
    }

    #[test]
    fn test_translate_buttons() {
        assert_eq!(translate_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(translate_button(MouseButton::Other(9)), PointerButton::Other(9));
    }

    #[test]
    fn test_cursor_scaled_to_display() {
        // HiDPI window: 1600x1200 physical for an 800x600 display
        let pos = to_logical(PhysicalPosition::new(800.0, 300.0), PhysicalSize::new(1600, 1200));
        assert_eq!(pos, Vec2::new(400.0, 150.0));
    }
}
