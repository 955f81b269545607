//! Window session lifecycle
//!
//! A session goes Uninitialized → Running → Closed and never comes back: the
//! toolkit is brought up in [`WindowSession::new`] and torn down once, by
//! [`WindowSession::close`] or on drop.

use super::backend::{WindowBackend, WindowError, WindowEvent, WindowId, WindowResult};
use super::properties::WindowProperties;

/// One window plus the toolkit subsystems behind it
pub struct WindowSession<B: WindowBackend> {
    backend: B,
    title: String,
    width: u32,
    height: u32,
    window: Option<WindowId>,
    running: bool,
    initialized: bool,
    closed: bool,
    last_error: Option<String>,
}

impl<B: WindowBackend> WindowSession<B> {
    /// Bring up the toolkit and remember the window parameters.
    ///
    /// Initialization failure is logged; the session stays usable for queries
    /// but [`create`](Self::create) will refuse to run.
    pub fn new(mut backend: B, title: impl Into<String>, width: u32, height: u32) -> Self {
        let (initialized, last_error) = match backend.init() {
            Ok(()) => (true, None),
            Err(error) => {
                log::error!("{}", WindowError::InitializationFailed(error.clone()));
                (false, Some(error))
            }
        };

        Self {
            backend,
            title: title.into(),
            width,
            height,
            window: None,
            running: false,
            initialized,
            closed: false,
            last_error,
        }
    }

    /// Create the window; on success the session is running
    pub fn create(&mut self) -> WindowResult<()> {
        if self.closed {
            return Err(WindowError::Closed);
        }
        if !self.initialized {
            return Err(WindowError::NotInitialized);
        }
        if self.window.is_some() {
            return Ok(());
        }

        match self.backend.create_window(&self.title, self.width, self.height) {
            Ok(window) => {
                log::info!("Created window {:?} ({}x{})", self.title, self.width, self.height);
                self.window = Some(window);
                self.running = true;
                Ok(())
            }
            Err(error) => {
                log::error!("Window creation failed: {error}");
                self.running = false;
                self.last_error = Some(error.clone());
                Err(WindowError::CreationFailed(error))
            }
        }
    }

    /// Drain every pending event; returns how many were handled.
    ///
    /// A quit event closes the session; events still queued after it are
    /// dropped along with the toolkit.
    pub fn poll_event(&mut self) -> usize {
        if self.closed || !self.initialized {
            return 0;
        }

        let mut handled = 0;
        while let Some(event) = self.backend.poll_event() {
            handled += 1;
            match event {
                WindowEvent::Quit => {
                    log::info!("Quit requested");
                    self.close();
                    break;
                }
                WindowEvent::KeyDown(key) => log::info!("Key pressed: {}", key.name()),
                WindowEvent::Other => {}
            }
        }
        handled
    }

    /// Per-frame hook; nothing is drawn yet
    pub fn render(&mut self) {}

    /// Destroy the window and shut the toolkit down. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        if let Some(window) = self.window.take() {
            self.backend.destroy_window(window);
            log::debug!("Window {:?} destroyed", self.title);
        }
        self.running = false;

        if self.initialized {
            self.backend.quit();
            self.initialized = false;
        }
        self.closed = true;
    }

    /// Whether the window exists and no quit was received
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the toolkit subsystems are up
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current window, if any
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Window size in pixels
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Most recent toolkit error message
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Native handles of the current window; empty without one
    pub fn properties(&self) -> WindowProperties {
        self.window
            .map(|window| self.backend.window_properties(window))
            .unwrap_or_default()
    }

    /// Underlying backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: WindowBackend> Drop for WindowSession<B> {
    fn drop(&mut self) {
        self.close();
    }
}
