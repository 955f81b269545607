//! Physical device description
//!
//! A [`DeviceDescriptor`] is captured once per physical device and never
//! mutated afterwards. The device handle it carries is borrowed from the
//! instance's enumeration; physical devices are not created or destroyed by
//! the application.

use std::collections::HashSet;
use std::fmt;

use ash::vk;

use super::api::InstanceApi;
use super::capability::{capability_name, filter_capabilities};
use super::check::check_value;
use super::query::{enumerate, enumerate_infallible};
use super::VulkanResult;

/// Vulkan version packed into a `u32`, decomposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
    /// Variant; 0 for Vulkan itself
    pub variant: u32,
}

impl From<u32> for ApiVersion {
    fn from(raw: u32) -> Self {
        Self {
            major: vk::api_version_major(raw),
            minor: vk::api_version_minor(raw),
            patch: vk::api_version_patch(raw),
            variant: vk::api_version_variant(raw),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.variant)
    }
}

/// Presentation data for a device/surface pair
#[derive(Debug, Clone)]
pub struct SurfaceSupport {
    /// Supported surface formats, as reported
    pub formats: Vec<vk::SurfaceFormatKHR>,
    /// Image counts, extents, transforms, alpha modes and usage flags, as reported
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    /// Supported presentation modes, as reported
    pub present_modes: Vec<vk::PresentModeKHR>,
    /// Present support per queue family, indexed like the device's queue families
    pub present_queue_families: Vec<bool>,
}

/// Immutable capability snapshot of one physical device
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    device: vk::PhysicalDevice,
    features: vk::PhysicalDeviceFeatures,
    properties: vk::PhysicalDeviceProperties,
    memory_properties: vk::PhysicalDeviceMemoryProperties,
    queue_families: Vec<vk::QueueFamilyProperties>,
    extensions: Vec<String>,
    enabled_extensions: HashSet<String>,
    surface: Option<SurfaceSupport>,
}

impl DeviceDescriptor {
    /// Query the full capability profile of `device`.
    ///
    /// Surface data is captured only when a non-null `surface` is given.
    /// Extension enumeration failing aborts construction; the device cannot be
    /// used without a trustworthy extension list.
    pub fn new<A, S>(
        api: &A,
        device: vk::PhysicalDevice,
        surface: Option<vk::SurfaceKHR>,
        requested_extensions: &[S],
        print_diagnostics: bool,
    ) -> VulkanResult<Self>
    where
        A: InstanceApi + ?Sized,
        S: AsRef<str>,
    {
        let features = api.physical_device_features(device);
        let properties = api.physical_device_properties(device);
        let memory_properties = api.physical_device_memory_properties(device);

        let queue_families: Vec<vk::QueueFamilyProperties> = enumerate_infallible(|count, out| {
            api.physical_device_queue_family_properties(device, count, out);
        })
        .into_iter()
        .map(|family| family.queue_family_properties)
        .collect();

        let extensions: Vec<String> = enumerate("vkEnumerateDeviceExtensionProperties", |count, out| {
            api.enumerate_device_extension_properties(device, count, out)
        })?
        .iter()
        .map(|extension| capability_name(&extension.extension_name))
        .collect();

        let enabled_extensions = filter_capabilities(
            &extensions,
            requested_extensions.iter().map(AsRef::as_ref),
        );

        let surface = match surface {
            Some(surface) if surface != vk::SurfaceKHR::null() => Some(Self::query_surface_support(
                api,
                device,
                surface,
                queue_families.len(),
            )?),
            _ => None,
        };

        let descriptor = Self {
            device,
            features,
            properties,
            memory_properties,
            queue_families,
            extensions,
            enabled_extensions,
            surface,
        };

        if print_diagnostics {
            log::info!("{}", descriptor.report());
        }

        Ok(descriptor)
    }

    fn query_surface_support<A>(
        api: &A,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        queue_family_count: usize,
    ) -> VulkanResult<SurfaceSupport>
    where
        A: InstanceApi + ?Sized,
    {
        let formats = enumerate("vkGetPhysicalDeviceSurfaceFormatsKHR", |count, out| {
            api.physical_device_surface_formats(device, surface, count, out)
        })?;

        let capabilities = check_value(
            "vkGetPhysicalDeviceSurfaceCapabilitiesKHR",
            api.physical_device_surface_capabilities(device, surface),
        )?;

        let present_modes = enumerate("vkGetPhysicalDeviceSurfacePresentModesKHR", |count, out| {
            api.physical_device_surface_present_modes(device, surface, count, out)
        })?;

        let present_queue_families = (0..queue_family_count)
            .map(|index| {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                check_value(
                    "vkGetPhysicalDeviceSurfaceSupportKHR",
                    api.physical_device_surface_support(device, index, surface),
                )
            })
            .collect::<VulkanResult<Vec<bool>>>()?;

        Ok(SurfaceSupport {
            formats,
            capabilities,
            present_modes,
            present_queue_families,
        })
    }

    /// Physical device handle (not owned)
    pub const fn handle(&self) -> vk::PhysicalDevice {
        self.device
    }

    /// Supported features
    pub const fn features(&self) -> &vk::PhysicalDeviceFeatures {
        &self.features
    }

    /// Device properties and limits
    pub const fn properties(&self) -> &vk::PhysicalDeviceProperties {
        &self.properties
    }

    /// Memory heaps and types
    pub const fn memory_properties(&self) -> &vk::PhysicalDeviceMemoryProperties {
        &self.memory_properties
    }

    /// Queue families; the position of each entry is its queue family index
    pub fn queue_families(&self) -> &[vk::QueueFamilyProperties] {
        &self.queue_families
    }

    /// Extensions advertised by the device, in reported order
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Requested extensions the device supports
    pub const fn enabled_extensions(&self) -> &HashSet<String> {
        &self.enabled_extensions
    }

    /// Whether the device advertises `name`
    pub fn supports_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension == name)
    }

    /// Whether `name` was requested and is supported
    pub fn is_extension_enabled(&self, name: &str) -> bool {
        self.enabled_extensions.contains(name)
    }

    /// Presentation data, present only if a surface was supplied
    pub const fn surface_support(&self) -> Option<&SurfaceSupport> {
        self.surface.as_ref()
    }

    /// Supported surface formats; empty without a surface
    pub fn surface_formats(&self) -> &[vk::SurfaceFormatKHR] {
        self.surface.as_ref().map_or(&[], |surface| surface.formats.as_slice())
    }

    /// Surface capabilities; `None` without a surface
    pub fn surface_capabilities(&self) -> Option<&vk::SurfaceCapabilitiesKHR> {
        self.surface.as_ref().map(|surface| &surface.capabilities)
    }

    /// Supported presentation modes; empty without a surface
    pub fn present_modes(&self) -> &[vk::PresentModeKHR] {
        self.surface.as_ref().map_or(&[], |surface| surface.present_modes.as_slice())
    }

    /// Device name as reported by the driver
    pub fn name(&self) -> String {
        capability_name(&self.properties.device_name)
    }

    /// Discrete, integrated, virtual, CPU or other
    pub const fn device_type(&self) -> vk::PhysicalDeviceType {
        self.properties.device_type
    }

    /// Highest Vulkan version the device supports
    pub fn api_version(&self) -> ApiVersion {
        ApiVersion::from(self.properties.api_version)
    }

    /// Index of the first queue family supporting all of `flags`
    pub fn find_queue_family(&self, flags: vk::QueueFlags) -> Option<u32> {
        self.queue_families
            .iter()
            .position(|family| family.queue_count > 0 && family.queue_flags.contains(flags))
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Index of the first queue family that can present to the surface
    pub fn present_queue_family(&self) -> Option<u32> {
        self.surface
            .as_ref()?
            .present_queue_families
            .iter()
            .position(|&supported| supported)
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Human-readable capability dump
    pub const fn report(&self) -> DeviceReport<'_> {
        DeviceReport(self)
    }
}

/// Display adapter produced by [`DeviceDescriptor::report`]
pub struct DeviceReport<'a>(&'a DeviceDescriptor);

impl fmt::Display for DeviceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = self.0;
        let properties = device.properties();
        writeln!(
            f,
            "{} {:#06x} ({:#06x}) {:?} - Vulkan {}",
            device.name(),
            properties.vendor_id,
            properties.device_id,
            properties.device_type,
            device.api_version()
        )?;

        writeln!(f, "Extensions:")?;
        for extension in device.extensions() {
            writeln!(f, "\t{extension}")?;
        }

        writeln!(f, "Supported surface formats:")?;
        for format in device.surface_formats() {
            writeln!(f, "\t{:?} : {:?}", format.format, format.color_space)?;
        }

        write!(f, "Supported presentation modes:")?;
        for mode in device.present_modes() {
            write!(f, "\n\t{mode:?}")?;
        }
        Ok(())
    }
}

/// Pick the device to render with.
///
/// A device qualifies when it has a graphics queue, every `required_extensions`
/// entry is enabled, and (if surface data was captured) some queue family can
/// present. Among qualifying devices discrete GPUs win, then integrated,
/// virtual and CPU devices; ties keep enumeration order.
pub fn select_device<'a, S: AsRef<str>>(
    descriptors: &'a [DeviceDescriptor],
    required_extensions: &[S],
) -> Option<&'a DeviceDescriptor> {
    descriptors
        .iter()
        .filter(|descriptor| {
            descriptor.find_queue_family(vk::QueueFlags::GRAPHICS).is_some()
                && required_extensions
                    .iter()
                    .all(|name| descriptor.is_extension_enabled(name.as_ref()))
                && (descriptor.surface_support().is_none() || descriptor.present_queue_family().is_some())
        })
        .min_by_key(|descriptor| match descriptor.device_type() {
            vk::PhysicalDeviceType::DISCRETE_GPU => 0,
            vk::PhysicalDeviceType::INTEGRATED_GPU => 1,
            vk::PhysicalDeviceType::VIRTUAL_GPU => 2,
            vk::PhysicalDeviceType::CPU => 3,
            _ => 4,
        })
}
