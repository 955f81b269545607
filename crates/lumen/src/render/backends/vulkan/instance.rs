//! Vulkan instance and presentation surface
//!
//! [`GraphicsInstance`] negotiates layers and extensions against what the
//! loader offers, creates the instance, and, when the window supplies native
//! handles, a surface to present to. It owns all three (plus the optional
//! debug messenger) and releases them in reverse order on drop.

use std::collections::HashSet;
use std::ffi::{c_char, CString};

use ash::vk;

use super::api::{AshInstance, AshLoader, InstanceApi, Loader};
use super::capability::{capability_name, filter_capabilities};
use super::check::check_value;
use super::device::DeviceDescriptor;
use super::query::enumerate;
use super::surface::{
    has_platform_extension, requested_instance_extensions, requested_instance_layers, SurfaceTarget,
    DEBUG_UTILS_EXTENSION,
};
use super::{VulkanError, VulkanResult};
use crate::config::{ApplicationConfig, GraphicsConfig};
use crate::render::window::WindowProperties;

const ENGINE_NAME: &str = "Lumen";

/// Vulkan instance with its optional surface and debug messenger
pub struct GraphicsInstance<I: InstanceApi = AshInstance> {
    api: I,
    surface: Option<vk::SurfaceKHR>,
    debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
    enabled_layers: HashSet<String>,
    enabled_extensions: HashSet<String>,
    print_diagnostics: bool,
}

impl GraphicsInstance<AshInstance> {
    /// Create an instance through the system Vulkan loader
    pub fn from_window(
        properties: &WindowProperties,
        application: &ApplicationConfig,
        graphics: &GraphicsConfig,
    ) -> VulkanResult<Self> {
        let loader = AshLoader::load()?;
        Self::new(&loader, properties, application, graphics)
    }
}

impl<I: InstanceApi> GraphicsInstance<I> {
    /// Negotiate capabilities, create the instance, then the surface.
    ///
    /// A window without native handles still yields an instance; it just has
    /// no surface and a warning is logged.
    pub fn new<L>(
        loader: &L,
        properties: &WindowProperties,
        application: &ApplicationConfig,
        graphics: &GraphicsConfig,
    ) -> VulkanResult<Self>
    where
        L: Loader<Instance = I>,
    {
        let validation = graphics.validation_enabled();

        let available_layers: Vec<String> = enumerate("vkEnumerateInstanceLayerProperties", |count, out| {
            loader.enumerate_instance_layer_properties(count, out)
        })?
        .iter()
        .map(|layer| capability_name(&layer.layer_name))
        .collect();

        let available_extensions: Vec<String> =
            enumerate("vkEnumerateInstanceExtensionProperties", |count, out| {
                loader.enumerate_instance_extension_properties(count, out)
            })?
            .iter()
            .map(|extension| capability_name(&extension.extension_name))
            .collect();

        let enabled_layers = filter_capabilities(&available_layers, requested_instance_layers(validation));
        let enabled_extensions =
            filter_capabilities(&available_extensions, requested_instance_extensions(validation));

        if validation && enabled_layers.is_empty() {
            log::warn!("Validation requested but no validation layer is available");
        }
        log::debug!("Enabled instance layers: {:?}", enabled_layers);
        log::debug!("Enabled instance extensions: {:?}", enabled_extensions);

        let layer_names = to_c_strings(&enabled_layers)?;
        let extension_names = to_c_strings(&enabled_extensions)?;
        let layer_pointers: Vec<*const c_char> = layer_names.iter().map(|name| name.as_ptr()).collect();
        let extension_pointers: Vec<*const c_char> =
            extension_names.iter().map(|name| name.as_ptr()).collect();

        let application_name = to_c_string(&application.name)?;
        let engine_name = to_c_string(ENGINE_NAME)?;
        let (major, minor, patch) = application.version;
        let application_info = vk::ApplicationInfo::builder()
            .application_name(&application_name)
            .application_version(vk::make_api_version(0, major, minor, patch))
            .engine_name(&engine_name)
            .engine_version(vk::make_api_version(0, 0, 1, 0))
            .api_version(vk::API_VERSION_1_3);

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&application_info)
            .enabled_layer_names(&layer_pointers)
            .enabled_extension_names(&extension_pointers);

        let api = check_value("vkCreateInstance", loader.create_instance(&create_info))?;
        log::info!("Vulkan instance created for {:?}", application.name);

        // Owned from here on; an early return below still destroys the instance
        let mut instance = Self {
            api,
            surface: None,
            debug_messenger: None,
            enabled_layers,
            enabled_extensions,
            print_diagnostics: graphics.print_device_diagnostics,
        };

        instance.surface = instance.create_surface(properties)?;

        if validation && instance.enabled_extensions.contains(DEBUG_UTILS_EXTENSION) {
            instance.debug_messenger = Some(check_value(
                "vkCreateDebugUtilsMessengerEXT",
                instance.api.create_debug_messenger(),
            )?);
        }

        Ok(instance)
    }

    fn create_surface(&self, properties: &WindowProperties) -> VulkanResult<Option<vk::SurfaceKHR>> {
        if !has_platform_extension(&self.enabled_extensions) {
            log::warn!("No platform surface extension available; continuing without a surface");
            return Ok(None);
        }

        let Some(target) = SurfaceTarget::negotiate(&self.enabled_extensions, properties) else {
            log::warn!("Window provides no native handles for a surface; continuing without one");
            return Ok(None);
        };

        let surface = check_value("vkCreateSurfaceKHR", self.api.create_surface(&target))?;
        log::info!("Created surface through {}", target.extension_name());
        Ok(Some(surface))
    }

    /// Describe every physical device, in enumeration order
    pub fn enumerate_physical_devices<S: AsRef<str>>(
        &self,
        requested_extensions: &[S],
    ) -> VulkanResult<Vec<DeviceDescriptor>> {
        let devices = enumerate("vkEnumeratePhysicalDevices", |count, out| {
            self.api.enumerate_physical_devices(count, out)
        })?;

        if devices.is_empty() {
            log::error!("No Vulkan physical devices found");
            return Err(VulkanError::NoPhysicalDevices);
        }

        devices
            .into_iter()
            .map(|device| {
                DeviceDescriptor::new(
                    &self.api,
                    device,
                    self.surface,
                    requested_extensions,
                    self.print_diagnostics,
                )
            })
            .collect()
    }

    /// Whether a presentation surface was created
    pub const fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Presentation surface, if one was created
    pub const fn surface(&self) -> Option<vk::SurfaceKHR> {
        self.surface
    }

    /// Layers enabled on the instance
    pub const fn enabled_layers(&self) -> &HashSet<String> {
        &self.enabled_layers
    }

    /// Extensions enabled on the instance
    pub const fn enabled_extensions(&self) -> &HashSet<String> {
        &self.enabled_extensions
    }

    /// Raw instance handle
    pub fn handle(&self) -> vk::Instance {
        self.api.handle()
    }

    /// Underlying API object
    pub const fn api(&self) -> &I {
        &self.api
    }
}

impl<I: InstanceApi> Drop for GraphicsInstance<I> {
    fn drop(&mut self) {
        if let Some(messenger) = self.debug_messenger.take() {
            self.api.destroy_debug_messenger(messenger);
        }
        if let Some(surface) = self.surface.take() {
            self.api.destroy_surface(surface);
        }
        self.api.destroy_instance();
        log::debug!("Vulkan instance destroyed");
    }
}

fn to_c_string(name: &str) -> VulkanResult<CString> {
    CString::new(name).map_err(|_| VulkanError::InvalidName(name.to_string()))
}

fn to_c_strings(names: &HashSet<String>) -> VulkanResult<Vec<CString>> {
    names.iter().map(|name| to_c_string(name)).collect()
}
