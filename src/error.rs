//! Fatal startup errors
//!
//! Anything that stops the game from showing a window ends up here and makes
//! the process exit non-zero. Recoverable failures (leaderboard reads, audio
//! output) are handled where they happen and never reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("graphics device ran out of memory")]
    OutOfMemory,
}
