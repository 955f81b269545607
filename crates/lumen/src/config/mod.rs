//! Configuration system
//!
//! Configuration types are plain serde structs. Any type implementing
//! [`Config`] can be loaded from and saved to `.toml` or `.ron` files.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

mod bootstrap;

pub use bootstrap::{ApplicationConfig, BootstrapConfig, GraphicsConfig, WindowConfig};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file, picking the format from the extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration from file, falling back to defaults when the file is missing
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lumen-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_toml() {
        let path = scratch_path("load.toml");
        std::fs::write(
            &path,
            r#"
[application]
name = "Probe"
version = [2, 1, 0]

[window]
title = "Probe window"
width = 1024
height = 768

[graphics]
enable_validation = false
device_extensions = ["VK_KHR_swapchain"]
print_device_diagnostics = false
"#,
        )
        .unwrap();

        let config = BootstrapConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.application.name, "Probe");
        assert_eq!(config.application.version, (2, 1, 0));
        assert_eq!(config.window.width, 1024);
        assert!(!config.graphics.enable_validation);
        assert_eq!(config.graphics.device_extensions, vec!["VK_KHR_swapchain".to_string()]);
    }

    #[test]
    fn test_save_then_load_ron() {
        let path = scratch_path("save.ron");
        let mut config = BootstrapConfig::default();
        config.window.title = "Saved".to_string();

        config.save_to_file(&path).unwrap();
        let loaded = BootstrapConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.window.title, "Saved");
    }

    #[test]
    fn test_unsupported_format() {
        let result = BootstrapConfig::load_from_file(scratch_path("config.yaml"));
        // Missing file is reported before the format check
        assert!(matches!(result, Err(ConfigError::Io(_))));

        let result = BootstrapConfig::default().save_to_file(scratch_path("config.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = BootstrapConfig::load_or_default(scratch_path("missing.toml")).unwrap();
        assert_eq!(config.window.width, WindowConfig::default().width);
    }
}
