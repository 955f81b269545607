//! Scripted window backend for tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::rc::Rc;

use super::backend::{WindowBackend, WindowEvent, WindowId};
use super::properties::{WindowProperties, WAYLAND_DISPLAY_POINTER, WAYLAND_SURFACE_POINTER};

/// Counters shared with the test after the backend moves into a session
#[derive(Debug, Default)]
pub struct MockState {
    pub init_calls: usize,
    pub quit_calls: usize,
    pub created: Vec<WindowId>,
    pub destroyed: Vec<WindowId>,
    pub events: VecDeque<WindowEvent>,
    pub polled: usize,
}

/// Scripted backend; failures are injected through the `fail_*` fields
#[derive(Debug, Default)]
pub struct MockBackend {
    pub state: Rc<RefCell<MockState>>,
    pub fail_init: Option<String>,
    pub fail_create: Option<String>,
    next_id: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue events to be returned by `poll_event`
    pub fn with_events(self, events: &[WindowEvent]) -> Self {
        self.state.borrow_mut().events.extend(events.iter().copied());
        self
    }

    pub fn state(&self) -> Rc<RefCell<MockState>> {
        Rc::clone(&self.state)
    }
}

impl WindowBackend for MockBackend {
    fn init(&mut self) -> Result<(), String> {
        self.state.borrow_mut().init_calls += 1;
        self.fail_init.clone().map_or(Ok(()), Err)
    }

    fn quit(&mut self) {
        let mut state = self.state.borrow_mut();
        state.quit_calls += 1;
        state.events.clear();
    }

    fn create_window(&mut self, _title: &str, _width: u32, _height: u32) -> Result<WindowId, String> {
        if let Some(error) = &self.fail_create {
            return Err(error.clone());
        }
        self.next_id += 1;
        let window = WindowId(self.next_id);
        self.state.borrow_mut().created.push(window);
        Ok(window)
    }

    fn destroy_window(&mut self, window: WindowId) {
        self.state.borrow_mut().destroyed.push(window);
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        let mut state = self.state.borrow_mut();
        let event = state.events.pop_front();
        if event.is_some() {
            state.polled += 1;
        }
        event
    }

    fn window_properties(&self, window: WindowId) -> WindowProperties {
        let mut properties = WindowProperties::default();
        let state = self.state.borrow();
        if state.created.contains(&window) && !state.destroyed.contains(&window) {
            properties.set_pointer(WAYLAND_DISPLAY_POINTER, NonNull::<c_void>::dangling().as_ptr());
            properties.set_pointer(WAYLAND_SURFACE_POINTER, NonNull::<c_void>::dangling().as_ptr());
        }
        properties
    }
}
