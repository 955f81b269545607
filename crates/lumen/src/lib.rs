//! # Lumen
//!
//! Bootstrap layer for a Vulkan renderer: negotiates instance layers and
//! extensions, creates a presentation surface for a native window, describes
//! every physical device, and drives the window's event loop.
//!
//! ## Features
//!
//! - **Capability negotiation**: set intersection of available and requested
//!   layers/extensions
//! - **Device description**: immutable snapshot of features, properties,
//!   memory layout, queue families and surface support per physical device
//! - **Window session**: create / poll / close lifecycle over a pluggable
//!   windowing backend (GLFW behind the `glfw` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "glfw")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use lumen::prelude::*;
//!
//! let config = BootstrapConfig::default();
//! let mut session = WindowSession::new(GlfwBackend::new(), "Lumen", 800, 600);
//! session.create()?;
//!
//! let instance = GraphicsInstance::from_window(
//!     &session.properties(),
//!     &config.application,
//!     &config.graphics,
//! )?;
//! let devices = instance.enumerate_physical_devices(&config.graphics.device_extensions)?;
//!
//! while session.is_running() {
//!     session.poll_event();
//!     session.render();
//! }
//! # drop(devices);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "glfw"))]
//! # fn main() {}
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod render;

/// Common imports for users of the bootstrap layer
pub mod prelude {
    pub use crate::{
        config::{ApplicationConfig, BootstrapConfig, Config, ConfigError, GraphicsConfig, WindowConfig},
        input::KeyCode,
        render::backends::vulkan::{
            filter_capabilities, select_device, ApiVersion, DeviceDescriptor, GraphicsInstance,
            SurfaceSupport, VulkanError, VulkanResult,
        },
        render::window::{
            WindowBackend, WindowError, WindowEvent, WindowId, WindowProperties, WindowResult,
            WindowSession,
        },
    };

    #[cfg(feature = "glfw")]
    pub use crate::render::window::GlfwBackend;
}
