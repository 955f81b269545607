//! Native window properties
//!
//! Windowing toolkits expose the native handles behind a window in different
//! ways. Backends copy them into a [`WindowProperties`] map under the keys
//! below so the graphics side can look them up without knowing the toolkit.

use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr::NonNull;

/// `wl_display*` of a Wayland window
pub const WAYLAND_DISPLAY_POINTER: &str = "wayland.display";
/// `wl_surface*` of a Wayland window
pub const WAYLAND_SURFACE_POINTER: &str = "wayland.surface";
/// Xlib `Display*`
pub const XLIB_DISPLAY_POINTER: &str = "x11.display";
/// Xlib `Window` id
pub const XLIB_WINDOW_NUMBER: &str = "x11.window";
/// Win32 `HWND`
pub const WIN32_HWND_POINTER: &str = "win32.hwnd";
/// Win32 `HINSTANCE`
pub const WIN32_INSTANCE_POINTER: &str = "win32.hinstance";

/// Value stored under a property key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    /// Opaque native pointer
    Pointer(NonNull<c_void>),
    /// Native integer handle
    Number(u64),
}

/// Key/value view of a window's native handles
///
/// Pointers are borrowed from the toolkit and stay valid only while the
/// window they were read from is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowProperties {
    values: HashMap<String, PropertyValue>,
}

impl WindowProperties {
    /// Store a pointer; null pointers are not stored
    pub fn set_pointer(&mut self, key: &str, pointer: *mut c_void) {
        if let Some(pointer) = NonNull::new(pointer) {
            self.values.insert(key.to_string(), PropertyValue::Pointer(pointer));
        }
    }

    /// Store an integer handle
    pub fn set_number(&mut self, key: &str, number: u64) {
        self.values.insert(key.to_string(), PropertyValue::Number(number));
    }

    /// Pointer stored under `key`
    pub fn pointer(&self, key: &str) -> Option<NonNull<c_void>> {
        match self.values.get(key)? {
            PropertyValue::Pointer(pointer) => Some(*pointer),
            PropertyValue::Number(_) => None,
        }
    }

    /// Integer handle stored under `key`
    pub fn number(&self, key: &str) -> Option<u64> {
        match self.values.get(key)? {
            PropertyValue::Number(number) => Some(*number),
            PropertyValue::Pointer(_) => None,
        }
    }

    /// Raw value stored under `key`
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        self.values.get(key).copied()
    }

    /// Whether no handles are known
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored properties
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointer_is_not_stored() {
        let mut properties = WindowProperties::default();
        properties.set_pointer(WAYLAND_DISPLAY_POINTER, std::ptr::null_mut());
        assert!(properties.is_empty());
        assert_eq!(properties.pointer(WAYLAND_DISPLAY_POINTER), None);
    }

    #[test]
    fn test_typed_lookup() {
        let pointer = NonNull::<c_void>::dangling();
        let mut properties = WindowProperties::default();
        properties.set_pointer(XLIB_DISPLAY_POINTER, pointer.as_ptr());
        properties.set_number(XLIB_WINDOW_NUMBER, 7);

        assert_eq!(properties.len(), 2);
        assert_eq!(properties.pointer(XLIB_DISPLAY_POINTER), Some(pointer));
        assert_eq!(properties.number(XLIB_WINDOW_NUMBER), Some(7));
        assert_eq!(properties.number(XLIB_DISPLAY_POINTER), None);
        assert_eq!(properties.pointer(XLIB_WINDOW_NUMBER), None);
        assert_eq!(properties.get(WIN32_HWND_POINTER), None);
    }
}
