//! Graphics API boundary
//!
//! [`Loader`] covers the entry points available before an instance exists;
//! [`InstanceApi`] covers everything reached through an instance. Variable
//! length queries keep Vulkan's two-phase shape: a count in/out parameter and
//! an optional output buffer.
//!
//! [`AshLoader`] and [`AshInstance`] forward to the driver through `ash`.

use std::ffi::{c_void, CStr};
use std::ptr;

use ash::extensions::{ext, khr};
use ash::prelude::VkResult;
use ash::{vk, Entry, Instance};

use super::surface::SurfaceTarget;
use super::{VulkanError, VulkanResult};

/// Entry points callable before an instance exists
pub trait Loader {
    /// Instance type produced by [`Loader::create_instance`]
    type Instance: InstanceApi;

    /// `vkEnumerateInstanceLayerProperties`
    fn enumerate_instance_layer_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::LayerProperties]>,
    ) -> vk::Result;

    /// `vkEnumerateInstanceExtensionProperties` for the implicit layers
    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result;

    /// `vkCreateInstance`
    fn create_instance(&self, create_info: &vk::InstanceCreateInfo) -> VkResult<Self::Instance>;
}

/// Entry points reached through a live instance
pub trait InstanceApi {
    /// Raw instance handle
    fn handle(&self) -> vk::Instance;

    /// `vkEnumeratePhysicalDevices`
    fn enumerate_physical_devices(
        &self,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result;

    /// `vkGetPhysicalDeviceFeatures2`
    fn physical_device_features(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures;

    /// `vkGetPhysicalDeviceProperties2`
    fn physical_device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties;

    /// `vkGetPhysicalDeviceMemoryProperties2`
    fn physical_device_memory_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties;

    /// `vkGetPhysicalDeviceQueueFamilyProperties2`
    fn physical_device_queue_family_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::QueueFamilyProperties2]>,
    );

    /// `vkEnumerateDeviceExtensionProperties`
    fn enumerate_device_extension_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result;

    /// `vkGetPhysicalDeviceSurfaceFormatsKHR`
    fn physical_device_surface_formats(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        count: &mut u32,
        formats: Option<&mut [vk::SurfaceFormatKHR]>,
    ) -> vk::Result;

    /// `vkGetPhysicalDeviceSurfaceCapabilitiesKHR`
    fn physical_device_surface_capabilities(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> VkResult<vk::SurfaceCapabilitiesKHR>;

    /// `vkGetPhysicalDeviceSurfacePresentModesKHR`
    fn physical_device_surface_present_modes(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        count: &mut u32,
        modes: Option<&mut [vk::PresentModeKHR]>,
    ) -> vk::Result;

    /// `vkGetPhysicalDeviceSurfaceSupportKHR`
    fn physical_device_surface_support(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VkResult<bool>;

    /// Platform `vkCreate*SurfaceKHR` for the given native handles
    fn create_surface(&self, target: &SurfaceTarget) -> VkResult<vk::SurfaceKHR>;

    /// `vkDestroySurfaceKHR`
    fn destroy_surface(&self, surface: vk::SurfaceKHR);

    /// `vkCreateDebugUtilsMessengerEXT` routing messages into `log`
    fn create_debug_messenger(&self) -> VkResult<vk::DebugUtilsMessengerEXT>;

    /// `vkDestroyDebugUtilsMessengerEXT`
    fn destroy_debug_messenger(&self, messenger: vk::DebugUtilsMessengerEXT);

    /// `vkDestroyInstance`. Called exactly once, by the owning `GraphicsInstance`.
    fn destroy_instance(&mut self);
}

/// Clamp the count to the buffer and return the raw output pointer
fn output<T>(count: &mut u32, buffer: Option<&mut [T]>) -> *mut T {
    match buffer {
        Some(buffer) => {
            *count = (*count).min(u32::try_from(buffer.len()).unwrap_or(u32::MAX));
            buffer.as_mut_ptr()
        }
        None => ptr::null_mut(),
    }
}

/// Vulkan loader backed by the system library
#[derive(Clone)]
pub struct AshLoader {
    entry: Entry,
}

impl AshLoader {
    /// Load the Vulkan library
    pub fn load() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| VulkanError::Loading(e.to_string()))?;
        Ok(Self { entry })
    }

    /// Wrap an already loaded entry
    pub const fn from_entry(entry: Entry) -> Self {
        Self { entry }
    }
}

impl Loader for AshLoader {
    type Instance = AshInstance;

    fn enumerate_instance_layer_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::LayerProperties]>,
    ) -> vk::Result {
        let data = output(count, properties);
        unsafe { (self.entry.fp_v1_0().enumerate_instance_layer_properties)(count, data) }
    }

    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        let data = output(count, properties);
        unsafe {
            (self.entry.fp_v1_0().enumerate_instance_extension_properties)(ptr::null(), count, data)
        }
    }

    fn create_instance(&self, create_info: &vk::InstanceCreateInfo) -> VkResult<AshInstance> {
        let instance = unsafe { self.entry.create_instance(create_info, None)? };
        Ok(AshInstance::new(self.entry.clone(), instance))
    }
}

/// Vulkan instance backed by `ash`
///
/// Destruction is explicit through [`InstanceApi::destroy_instance`]; the
/// owning `GraphicsInstance` calls it once, after its surface is gone.
pub struct AshInstance {
    entry: Entry,
    instance: Instance,
    surface_loader: khr::Surface,
    debug_utils: ext::DebugUtils,
}

impl AshInstance {
    fn new(entry: Entry, instance: Instance) -> Self {
        let surface_loader = khr::Surface::new(&entry, &instance);
        let debug_utils = ext::DebugUtils::new(&entry, &instance);
        Self {
            entry,
            instance,
            surface_loader,
            debug_utils,
        }
    }

    /// Get a reference to the Vulkan entry
    pub const fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Get a reference to the Vulkan instance
    pub const fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Get the surface loader
    pub const fn surface_loader(&self) -> &khr::Surface {
        &self.surface_loader
    }
}

impl InstanceApi for AshInstance {
    fn handle(&self) -> vk::Instance {
        self.instance.handle()
    }

    fn enumerate_physical_devices(
        &self,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result {
        let data = output(count, devices);
        unsafe { (self.instance.fp_v1_0().enumerate_physical_devices)(self.instance.handle(), count, data) }
    }

    fn physical_device_features(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures {
        let mut features = vk::PhysicalDeviceFeatures2::default();
        unsafe { self.instance.get_physical_device_features2(device, &mut features) };
        features.features
    }

    fn physical_device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        let mut properties = vk::PhysicalDeviceProperties2::default();
        unsafe { self.instance.get_physical_device_properties2(device, &mut properties) };
        properties.properties
    }

    fn physical_device_memory_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        let mut properties = vk::PhysicalDeviceMemoryProperties2::default();
        unsafe { self.instance.get_physical_device_memory_properties2(device, &mut properties) };
        properties.memory_properties
    }

    fn physical_device_queue_family_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::QueueFamilyProperties2]>,
    ) {
        let data = output(count, properties);
        unsafe { (self.instance.fp_v1_1().get_physical_device_queue_family_properties2)(device, count, data) };
    }

    fn enumerate_device_extension_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        let data = output(count, properties);
        unsafe {
            (self.instance.fp_v1_0().enumerate_device_extension_properties)(device, ptr::null(), count, data)
        }
    }

    fn physical_device_surface_formats(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        count: &mut u32,
        formats: Option<&mut [vk::SurfaceFormatKHR]>,
    ) -> vk::Result {
        let data = output(count, formats);
        unsafe {
            (self.surface_loader.fp().get_physical_device_surface_formats_khr)(device, surface, count, data)
        }
    }

    fn physical_device_surface_capabilities(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> VkResult<vk::SurfaceCapabilitiesKHR> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_capabilities(device, surface)
        }
    }

    fn physical_device_surface_present_modes(
        &self,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        count: &mut u32,
        modes: Option<&mut [vk::PresentModeKHR]>,
    ) -> vk::Result {
        let data = output(count, modes);
        unsafe {
            (self.surface_loader.fp().get_physical_device_surface_present_modes_khr)(device, surface, count, data)
        }
    }

    fn physical_device_surface_support(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
        surface: vk::SurfaceKHR,
    ) -> VkResult<bool> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_support(device, queue_family_index, surface)
        }
    }

    fn create_surface(&self, target: &SurfaceTarget) -> VkResult<vk::SurfaceKHR> {
        match *target {
            SurfaceTarget::Wayland { display, surface } => {
                let create_info = vk::WaylandSurfaceCreateInfoKHR::builder()
                    .display(display.as_ptr())
                    .surface(surface.as_ptr());
                let loader = khr::WaylandSurface::new(&self.entry, &self.instance);
                unsafe { loader.create_wayland_surface(&create_info, None) }
            }
            SurfaceTarget::Xlib { display, window } => {
                let create_info = vk::XlibSurfaceCreateInfoKHR::builder()
                    .dpy(display.as_ptr().cast())
                    .window(window as vk::Window);
                let loader = khr::XlibSurface::new(&self.entry, &self.instance);
                unsafe { loader.create_xlib_surface(&create_info, None) }
            }
            SurfaceTarget::Win32 { hinstance, hwnd } => {
                let create_info = vk::Win32SurfaceCreateInfoKHR::builder()
                    .hinstance(hinstance.as_ptr())
                    .hwnd(hwnd.as_ptr());
                let loader = khr::Win32Surface::new(&self.entry, &self.instance);
                unsafe { loader.create_win32_surface(&create_info, None) }
            }
        }
    }

    fn destroy_surface(&self, surface: vk::SurfaceKHR) {
        unsafe { self.surface_loader.destroy_surface(surface, None) };
    }

    fn create_debug_messenger(&self) -> VkResult<vk::DebugUtilsMessengerEXT> {
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        unsafe { self.debug_utils.create_debug_utils_messenger(&create_info, None) }
    }

    fn destroy_debug_messenger(&self, messenger: vk::DebugUtilsMessengerEXT) {
        unsafe { self.debug_utils.destroy_debug_utils_messenger(messenger, None) };
    }

    fn destroy_instance(&mut self) {
        unsafe { self.instance.destroy_instance(None) };
    }
}

/// Debug callback for validation layers
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    if callback_data.is_null() || (*callback_data).p_message.is_null() {
        return vk::FALSE;
    }
    let message = CStr::from_ptr((*callback_data).p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {:?} - {}", message_type, message);
    } else if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::warn!("[Vulkan] {:?} - {}", message_type, message);
    } else {
        log::debug!("[Vulkan] {:?} - {}", message_type, message);
    }

    vk::FALSE
}
