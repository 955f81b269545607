//! Platform surface selection
//!
//! Surface creation needs native handles from the window. They are looked up
//! by key in the window's [`WindowProperties`] and packed into a
//! [`SurfaceTarget`] for the platform whose extension was negotiated.

use std::collections::HashSet;
use std::ffi::c_void;
use std::ptr::NonNull;

use crate::render::window::properties::{
    WindowProperties, WAYLAND_DISPLAY_POINTER, WAYLAND_SURFACE_POINTER, WIN32_HWND_POINTER,
    WIN32_INSTANCE_POINTER, XLIB_DISPLAY_POINTER, XLIB_WINDOW_NUMBER,
};

/// Generic surface extension
pub const SURFACE_EXTENSION: &str = "VK_KHR_surface";
/// Wayland surface extension
pub const WAYLAND_SURFACE_EXTENSION: &str = "VK_KHR_wayland_surface";
/// Xlib surface extension
pub const XLIB_SURFACE_EXTENSION: &str = "VK_KHR_xlib_surface";
/// Win32 surface extension
pub const WIN32_SURFACE_EXTENSION: &str = "VK_KHR_win32_surface";
/// Debug utilities extension
pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";
/// Khronos validation layer
pub const VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Platform surface extensions this build can create surfaces for, in order of preference
#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
pub const PLATFORM_SURFACE_EXTENSIONS: &[&str] = &[WAYLAND_SURFACE_EXTENSION, XLIB_SURFACE_EXTENSION];

/// Platform surface extensions this build can create surfaces for, in order of preference
#[cfg(windows)]
pub const PLATFORM_SURFACE_EXTENSIONS: &[&str] = &[WIN32_SURFACE_EXTENSION];

/// Platform surface extensions this build can create surfaces for, in order of preference
#[cfg(not(any(
    windows,
    all(
        unix,
        not(any(target_os = "macos", target_os = "ios", target_os = "android"))
    )
)))]
pub const PLATFORM_SURFACE_EXTENSIONS: &[&str] = &[];

/// Native handles needed to create a surface on one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTarget {
    /// `wl_display` and `wl_surface` pointers
    Wayland {
        /// `wl_display*`
        display: NonNull<c_void>,
        /// `wl_surface*`
        surface: NonNull<c_void>,
    },
    /// Xlib `Display*` and window id
    Xlib {
        /// `Display*`
        display: NonNull<c_void>,
        /// X11 `Window`
        window: u64,
    },
    /// Win32 module instance and window handle
    Win32 {
        /// `HINSTANCE`
        hinstance: NonNull<c_void>,
        /// `HWND`
        hwnd: NonNull<c_void>,
    },
}

impl SurfaceTarget {
    /// Extract the handles for one platform extension; `None` if any handle is missing
    pub fn for_extension(extension: &str, properties: &WindowProperties) -> Option<Self> {
        match extension {
            WAYLAND_SURFACE_EXTENSION => Some(Self::Wayland {
                display: properties.pointer(WAYLAND_DISPLAY_POINTER)?,
                surface: properties.pointer(WAYLAND_SURFACE_POINTER)?,
            }),
            XLIB_SURFACE_EXTENSION => Some(Self::Xlib {
                display: properties.pointer(XLIB_DISPLAY_POINTER)?,
                window: properties.number(XLIB_WINDOW_NUMBER).filter(|&window| window != 0)?,
            }),
            WIN32_SURFACE_EXTENSION => Some(Self::Win32 {
                hinstance: properties.pointer(WIN32_INSTANCE_POINTER)?,
                hwnd: properties.pointer(WIN32_HWND_POINTER)?,
            }),
            _ => None,
        }
    }

    /// First platform, among the negotiated extensions, whose handles the window provides
    pub fn negotiate(enabled_extensions: &HashSet<String>, properties: &WindowProperties) -> Option<Self> {
        PLATFORM_SURFACE_EXTENSIONS
            .iter()
            .filter(|extension| enabled_extensions.contains(**extension))
            .find_map(|extension| Self::for_extension(extension, properties))
    }

    /// Instance extension required to create this surface
    pub const fn extension_name(&self) -> &'static str {
        match self {
            Self::Wayland { .. } => WAYLAND_SURFACE_EXTENSION,
            Self::Xlib { .. } => XLIB_SURFACE_EXTENSION,
            Self::Win32 { .. } => WIN32_SURFACE_EXTENSION,
        }
    }
}

/// Whether any platform surface extension is among the negotiated ones
pub fn has_platform_extension(enabled_extensions: &HashSet<String>) -> bool {
    PLATFORM_SURFACE_EXTENSIONS
        .iter()
        .any(|extension| enabled_extensions.contains(*extension))
}

/// Instance extensions requested for this build target
pub fn requested_instance_extensions(validation: bool) -> Vec<&'static str> {
    let mut extensions = Vec::with_capacity(PLATFORM_SURFACE_EXTENSIONS.len() + 2);
    extensions.extend_from_slice(PLATFORM_SURFACE_EXTENSIONS);
    if validation {
        extensions.push(DEBUG_UTILS_EXTENSION);
    }
    extensions.push(SURFACE_EXTENSION);
    extensions
}

/// Instance layers requested for this build target
pub fn requested_instance_layers(validation: bool) -> Vec<&'static str> {
    if validation {
        vec![VALIDATION_LAYER]
    } else {
        Vec::new()
    }
}
