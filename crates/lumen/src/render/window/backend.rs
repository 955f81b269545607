//! Toolkit-agnostic window backend trait
//!
//! A [`WindowBackend`] wraps one windowing toolkit: bringing its subsystems up
//! and down, creating and destroying windows, and handing out events one at a
//! time. [`WindowSession`](super::WindowSession) drives it; applications
//! normally only pick which backend to pass in.

use thiserror::Error;

use super::properties::WindowProperties;
use crate::input::KeyCode;

/// Identifier of a window owned by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Events a session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user asked to quit (window closed, Alt+F4, ...)
    Quit,
    /// A key was pressed
    KeyDown(KeyCode),
    /// Anything else; drained and ignored
    Other,
}

/// Window session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The toolkit's subsystems failed to start
    #[error("Window system initialization failed: {0}")]
    InitializationFailed(String),

    /// Operation needs subsystems that never started
    #[error("Window system is not initialized")]
    NotInitialized,

    /// The toolkit refused to create the window
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// The session was already closed
    #[error("Window session is closed")]
    Closed,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Interface every windowing toolkit backend implements
///
/// Errors are the toolkit's own messages. Mock backends implement this trait
/// in tests.
pub trait WindowBackend {
    /// Start the video and event subsystems
    fn init(&mut self) -> Result<(), String>;

    /// Tear the subsystems down; windows are already destroyed
    fn quit(&mut self);

    /// Create a window with no client API attached, sized in pixels
    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<WindowId, String>;

    /// Destroy a window created by this backend
    fn destroy_window(&mut self, window: WindowId);

    /// Next pending event, without blocking
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// Native handles of `window`; empty if unknown
    fn window_properties(&self, window: WindowId) -> WindowProperties;
}
