//! Rendering bootstrap
//!
//! - **`backends`**: graphics API backends (Vulkan)
//! - **`window`**: window session and windowing toolkit backends
//!
//! The window supplies the native handles the graphics instance needs to
//! create a presentation surface; otherwise the two are independent.

pub mod backends;
pub mod window;
