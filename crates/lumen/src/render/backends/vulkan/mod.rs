//! Vulkan backend
//!
//! Capability negotiation, instance and surface creation, and physical device
//! description. Every call into the driver goes through the [`api`] traits so
//! the negotiation logic can run against a scripted implementation in tests.

use std::panic::Location;

use ash::vk;
use thiserror::Error;

pub mod api;
pub mod capability;
pub mod check;
pub mod device;
pub mod instance;
pub mod query;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{AshInstance, AshLoader, InstanceApi, Loader};
pub use capability::filter_capabilities;
pub use device::{select_device, ApiVersion, DeviceDescriptor, SurfaceSupport};
pub use instance::GraphicsInstance;
pub use surface::SurfaceTarget;

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum VulkanError {
    /// A Vulkan call returned something other than `VK_SUCCESS`
    #[error("Error calling function {call} at {location}. Result is {result:?} ({code})", code = .result.as_raw())]
    CallFailed {
        /// Name of the failing Vulkan entry point
        call: &'static str,
        /// Source location of the call site
        location: &'static Location<'static>,
        /// Result code returned by the driver
        result: vk::Result,
    },

    /// The Vulkan loader library could not be loaded
    #[error("Failed to load Vulkan: {0}")]
    Loading(String),

    /// The instance reported no physical devices
    #[error("No Vulkan devices found")]
    NoPhysicalDevices,

    /// A name could not be passed to the driver
    #[error("Invalid name for Vulkan: {0:?}")]
    InvalidName(String),
}

impl VulkanError {
    /// Result code of a failed call, if this error came from the driver
    pub const fn result(&self) -> Option<vk::Result> {
        match self {
            Self::CallFailed { result, .. } => Some(*result),
            _ => None,
        }
    }
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
