//! Window management
//!
//! [`WindowSession`] owns one native window and the toolkit behind it. The
//! toolkit is pluggable through [`WindowBackend`]; the GLFW implementation is
//! available with the `glfw` feature.

pub mod backend;
pub mod properties;
pub mod session;

#[cfg(feature = "glfw")]
pub mod glfw_backend;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{WindowBackend, WindowError, WindowEvent, WindowId, WindowResult};
#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwBackend;
pub use properties::{PropertyValue, WindowProperties};
pub use session::WindowSession;
