//! GLFW window backend
//!
//! Windows are created with no client API so Vulkan can present to them.
//! Native handles are read through `raw-window-handle`.

use std::collections::{HashMap, VecDeque};

use glfw::{Action, ClientApiHint, Glfw, GlfwReceiver, Key, PWindow, WindowHint, WindowMode};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};

use super::backend::{WindowBackend, WindowEvent, WindowId};
use super::properties::{
    WindowProperties, WAYLAND_DISPLAY_POINTER, WAYLAND_SURFACE_POINTER, WIN32_HWND_POINTER,
    WIN32_INSTANCE_POINTER, XLIB_DISPLAY_POINTER, XLIB_WINDOW_NUMBER,
};
use crate::input::KeyCode;

struct NativeWindow {
    window: PWindow,
    events: GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// [`WindowBackend`] on top of GLFW
#[derive(Default)]
pub struct GlfwBackend {
    glfw: Option<Glfw>,
    windows: HashMap<WindowId, NativeWindow>,
    pending: VecDeque<WindowEvent>,
    next_id: u64,
}

impl GlfwBackend {
    /// Backend with GLFW not yet initialized
    pub fn new() -> Self {
        Self::default()
    }

    fn pump(&mut self) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.poll_events();

        for native in self.windows.values() {
            for (_, event) in glfw::flush_messages(&native.events) {
                self.pending.push_back(translate(event));
            }
        }
    }
}

impl WindowBackend for GlfwBackend {
    fn init(&mut self) -> Result<(), String> {
        let glfw = glfw::init(glfw::log_errors).map_err(|e| format!("GLFW initialization failed: {e:?}"))?;
        if !glfw.vulkan_supported() {
            log::warn!("GLFW reports no Vulkan loader; surfaces may be unavailable");
        }
        self.glfw = Some(glfw);
        Ok(())
    }

    fn quit(&mut self) {
        self.windows.clear();
        self.pending.clear();
        // Dropping the last Glfw handle terminates the library
        self.glfw = None;
    }

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<WindowId, String> {
        let glfw = self.glfw.as_mut().ok_or("GLFW is not initialized")?;

        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(width, height, title, WindowMode::Windowed)
            .ok_or_else(|| format!("Failed to create {width}x{height} window {title:?}"))?;

        window.set_key_polling(true);
        window.set_close_polling(true);

        self.next_id += 1;
        let id = WindowId(self.next_id);
        self.windows.insert(id, NativeWindow { window, events });
        Ok(id)
    }

    fn destroy_window(&mut self, window: WindowId) {
        self.windows.remove(&window);
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        if self.pending.is_empty() {
            self.pump();
        }
        self.pending.pop_front()
    }

    fn window_properties(&self, window: WindowId) -> WindowProperties {
        let mut properties = WindowProperties::default();
        let Some(native) = self.windows.get(&window) else {
            return properties;
        };

        match native.window.window_handle().map(|handle| handle.as_raw()) {
            Ok(RawWindowHandle::Wayland(handle)) => {
                properties.set_pointer(WAYLAND_SURFACE_POINTER, handle.surface.as_ptr());
            }
            Ok(RawWindowHandle::Xlib(handle)) => {
                properties.set_number(XLIB_WINDOW_NUMBER, u64::from(handle.window));
            }
            Ok(RawWindowHandle::Win32(handle)) => {
                properties.set_pointer(WIN32_HWND_POINTER, handle.hwnd.get() as *mut _);
                if let Some(hinstance) = handle.hinstance {
                    properties.set_pointer(WIN32_INSTANCE_POINTER, hinstance.get() as *mut _);
                }
            }
            Ok(other) => log::warn!("Unsupported window handle: {other:?}"),
            Err(e) => log::warn!("Window handle unavailable: {e}"),
        }

        match native.window.display_handle().map(|handle| handle.as_raw()) {
            Ok(RawDisplayHandle::Wayland(handle)) => {
                properties.set_pointer(WAYLAND_DISPLAY_POINTER, handle.display.as_ptr());
            }
            Ok(RawDisplayHandle::Xlib(handle)) => {
                if let Some(display) = handle.display {
                    properties.set_pointer(XLIB_DISPLAY_POINTER, display.as_ptr());
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Display handle unavailable: {e}"),
        }

        properties
    }
}

fn translate(event: glfw::WindowEvent) -> WindowEvent {
    match event {
        glfw::WindowEvent::Close => WindowEvent::Quit,
        glfw::WindowEvent::Key(key, _, Action::Press, _) => WindowEvent::KeyDown(key_code(key)),
        _ => WindowEvent::Other,
    }
}

fn offset(key: Key, first: Key) -> u8 {
    u8::try_from(key as i32 - first as i32).unwrap_or(u8::MAX)
}

fn key_code(key: Key) -> KeyCode {
    match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Num0
        | Key::Num1
        | Key::Num2
        | Key::Num3
        | Key::Num4
        | Key::Num5
        | Key::Num6
        | Key::Num7
        | Key::Num8
        | Key::Num9 => KeyCode::Digit(offset(key, Key::Num0)),
        Key::F1
        | Key::F2
        | Key::F3
        | Key::F4
        | Key::F5
        | Key::F6
        | Key::F7
        | Key::F8
        | Key::F9
        | Key::F10
        | Key::F11
        | Key::F12
        | Key::F13
        | Key::F14
        | Key::F15
        | Key::F16
        | Key::F17
        | Key::F18
        | Key::F19
        | Key::F20
        | Key::F21
        | Key::F22
        | Key::F23
        | Key::F24
        | Key::F25 => KeyCode::Function(offset(key, Key::F1) + 1),
        Key::Space => KeyCode::Space,
        Key::Enter | Key::KpEnter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::Backspace => KeyCode::Backspace,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::LeftShift | Key::RightShift => KeyCode::Shift,
        Key::LeftControl | Key::RightControl => KeyCode::Control,
        Key::LeftAlt | Key::RightAlt => KeyCode::Alt,
        _ => KeyCode::Unknown,
    }
}
