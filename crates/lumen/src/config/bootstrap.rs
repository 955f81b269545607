//! Bootstrap configuration: application identity, window, and graphics negotiation

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Top-level configuration for the bootstrap layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Application identity reported to the graphics driver
    pub application: ApplicationConfig,
    /// Window parameters
    pub window: WindowConfig,
    /// Layer/extension negotiation settings
    pub graphics: GraphicsConfig,
}

impl BootstrapConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.application.validate()?;
        self.window.validate()?;
        self.graphics.validate()
    }
}

impl Config for BootstrapConfig {}

/// Application identity used for the instance's application info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application name
    pub name: String,
    /// Application version (major, minor, patch)
    pub version: (u32, u32, u32),
}

impl ApplicationConfig {
    /// Create an application config with version 1.0.0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: (1, 0, 0),
        }
    }

    /// Set application version
    #[must_use]
    pub const fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.version = (major, minor, patch);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("Application name cannot be empty".to_string()));
        }
        if self.name.contains('\0') {
            return Err(ConfigError::Invalid("Application name cannot contain NUL".to_string()));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new("Lumen Application")
    }
}

/// Window creation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
}

impl WindowConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Layer/extension negotiation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Request the Khronos validation layer and debug-utils extension.
    /// On by default; whether they are enabled still depends on the loader.
    pub enable_validation: bool,
    /// Device extensions requested for every physical device
    pub device_extensions: Vec<String>,
    /// Log a capability dump for every enumerated device
    pub print_device_diagnostics: bool,
}

impl GraphicsConfig {
    /// Enable or disable validation layers
    #[must_use]
    pub const fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = enabled;
        self
    }

    /// Replace the requested device extensions
    #[must_use]
    pub fn with_device_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.device_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the validation layer and debug-utils extension are requested
    pub const fn validation_enabled(&self) -> bool {
        self.enable_validation
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = self.device_extensions.iter().find(|name| name.is_empty()) {
            return Err(ConfigError::Invalid(format!("Empty device extension name: {name:?}")));
        }
        Ok(())
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            enable_validation: true,
            device_extensions: vec!["VK_KHR_swapchain".to_string()],
            print_device_diagnostics: true,
        }
    }
}
