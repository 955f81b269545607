//! Scripted Vulkan implementation for tests

use std::cell::RefCell;
use std::os::raw::c_char;
use std::rc::Rc;

use ash::prelude::VkResult;
use ash::vk::{self, Handle};

use super::api::{InstanceApi, Loader};
use super::surface::SurfaceTarget;

/// Copy `items` into a two-phase output the way a driver would
pub fn fill<T: Clone>(items: &[T], count: &mut u32, out: Option<&mut [T]>) -> vk::Result {
    match out {
        None => {
            *count = u32::try_from(items.len()).unwrap();
            vk::Result::SUCCESS
        }
        Some(buffer) => {
            let written = buffer.len().min(items.len()).min(*count as usize);
            buffer[..written].clone_from_slice(&items[..written]);
            *count = u32::try_from(written).unwrap();
            if written < items.len() {
                vk::Result::INCOMPLETE
            } else {
                vk::Result::SUCCESS
            }
        }
    }
}

/// Encode a name into a fixed-size, NUL-terminated Vulkan array
pub fn raw_name<const N: usize>(name: &str) -> [c_char; N] {
    let mut raw = [0 as c_char; N];
    for (slot, byte) in raw.iter_mut().zip(name.bytes().take(N - 1)) {
        *slot = byte as c_char;
    }
    raw
}

/// Surface handle handed out by [`MockInstance::create_surface`]
pub const MOCK_SURFACE: u64 = 0x5u64;

/// One scripted physical device
#[derive(Clone)]
pub struct MockDevice {
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
    pub api_version: u32,
    pub queue_families: Vec<vk::QueueFamilyProperties>,
    pub extensions: Vec<String>,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
    pub present_support: Vec<bool>,
    pub extension_query_result: vk::Result,
}

impl MockDevice {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
            api_version: vk::make_api_version(0, 1, 3, 250),
            queue_families: vec![
                vk::QueueFamilyProperties {
                    queue_flags: vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER,
                    queue_count: 16,
                    ..Default::default()
                },
                vk::QueueFamilyProperties {
                    queue_flags: vk::QueueFlags::TRANSFER,
                    queue_count: 2,
                    ..Default::default()
                },
            ],
            extensions: vec!["VK_KHR_swapchain".to_string(), "VK_KHR_maintenance4".to_string()],
            formats: vec![vk::SurfaceFormatKHR {
                format: vk::Format::B8G8R8A8_SRGB,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            }],
            present_modes: vec![vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX],
            present_support: vec![true, false],
            extension_query_result: vk::Result::SUCCESS,
        }
    }

    pub fn with_type(mut self, device_type: vk::PhysicalDeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|name| (*name).to_string()).collect();
        self
    }
}

/// Calls recorded by the mock, shared between loader and instance
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Scripted loader
pub struct MockLoader {
    pub layers: Vec<String>,
    pub extensions: Vec<String>,
    pub devices: Vec<MockDevice>,
    pub create_result: vk::Result,
    pub surface_result: vk::Result,
    pub calls: CallLog,
}

impl MockLoader {
    pub fn new(layers: &[&str], extensions: &[&str], devices: Vec<MockDevice>) -> Self {
        Self {
            layers: layers.iter().map(|name| (*name).to_string()).collect(),
            extensions: extensions.iter().map(|name| (*name).to_string()).collect(),
            devices,
            create_result: vk::Result::SUCCESS,
            surface_result: vk::Result::SUCCESS,
            calls: CallLog::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Loader for MockLoader {
    type Instance = MockInstance;

    fn enumerate_instance_layer_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::LayerProperties]>,
    ) -> vk::Result {
        let layers: Vec<vk::LayerProperties> = self
            .layers
            .iter()
            .map(|name| vk::LayerProperties {
                layer_name: raw_name(name),
                ..Default::default()
            })
            .collect();
        fill(&layers, count, properties)
    }

    fn enumerate_instance_extension_properties(
        &self,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        let extensions: Vec<vk::ExtensionProperties> = self
            .extensions
            .iter()
            .map(|name| vk::ExtensionProperties {
                extension_name: raw_name(name),
                spec_version: 1,
            })
            .collect();
        fill(&extensions, count, properties)
    }

    fn create_instance(&self, create_info: &vk::InstanceCreateInfo) -> VkResult<MockInstance> {
        self.calls.borrow_mut().push(format!(
            "create_instance layers={} extensions={}",
            create_info.enabled_layer_count, create_info.enabled_extension_count
        ));
        if self.create_result != vk::Result::SUCCESS {
            return Err(self.create_result);
        }
        Ok(MockInstance {
            devices: self.devices.clone(),
            surface_result: self.surface_result,
            calls: Rc::clone(&self.calls),
        })
    }
}

/// Scripted instance
pub struct MockInstance {
    pub devices: Vec<MockDevice>,
    pub surface_result: vk::Result,
    pub calls: CallLog,
}

impl MockInstance {
    pub fn with_devices(devices: Vec<MockDevice>) -> Self {
        Self {
            devices,
            surface_result: vk::Result::SUCCESS,
            calls: CallLog::default(),
        }
    }

    /// Handle the mock reports for device `index`
    pub fn device_handle(index: usize) -> vk::PhysicalDevice {
        vk::PhysicalDevice::from_raw(index as u64 + 1)
    }

    fn device(&self, handle: vk::PhysicalDevice) -> &MockDevice {
        &self.devices[(handle.as_raw() - 1) as usize]
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl InstanceApi for MockInstance {
    fn handle(&self) -> vk::Instance {
        vk::Instance::from_raw(0x1)
    }

    fn enumerate_physical_devices(
        &self,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result {
        let handles: Vec<vk::PhysicalDevice> = (0..self.devices.len()).map(Self::device_handle).collect();
        fill(&handles, count, devices)
    }

    fn physical_device_features(&self, _device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures {
        vk::PhysicalDeviceFeatures {
            sampler_anisotropy: vk::TRUE,
            ..Default::default()
        }
    }

    fn physical_device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        let mock = self.device(device);
        vk::PhysicalDeviceProperties {
            api_version: mock.api_version,
            vendor_id: 0x10de,
            device_id: 0x2684,
            device_type: mock.device_type,
            device_name: raw_name(&mock.name),
            ..Default::default()
        }
    }

    fn physical_device_memory_properties(
        &self,
        _device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        let mut properties = vk::PhysicalDeviceMemoryProperties {
            memory_heap_count: 1,
            memory_type_count: 1,
            ..Default::default()
        };
        properties.memory_heaps[0] = vk::MemoryHeap {
            size: 8 << 30,
            flags: vk::MemoryHeapFlags::DEVICE_LOCAL,
        };
        properties.memory_types[0] = vk::MemoryType {
            property_flags: vk::MemoryPropertyFlags::DEVICE_LOCAL,
            heap_index: 0,
        };
        properties
    }

    fn physical_device_queue_family_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::QueueFamilyProperties2]>,
    ) {
        let families: Vec<vk::QueueFamilyProperties2> = self
            .device(device)
            .queue_families
            .iter()
            .map(|family| vk::QueueFamilyProperties2 {
                queue_family_properties: *family,
                ..Default::default()
            })
            .collect();
        fill(&families, count, properties);
    }

    fn enumerate_device_extension_properties(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        properties: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        let mock = self.device(device);
        if mock.extension_query_result != vk::Result::SUCCESS {
            return mock.extension_query_result;
        }
        let extensions: Vec<vk::ExtensionProperties> = mock
            .extensions
            .iter()
            .map(|name| vk::ExtensionProperties {
                extension_name: raw_name(name),
                spec_version: 1,
            })
            .collect();
        fill(&extensions, count, properties)
    }

    fn physical_device_surface_formats(
        &self,
        device: vk::PhysicalDevice,
        _surface: vk::SurfaceKHR,
        count: &mut u32,
        formats: Option<&mut [vk::SurfaceFormatKHR]>,
    ) -> vk::Result {
        fill(&self.device(device).formats, count, formats)
    }

    fn physical_device_surface_capabilities(
        &self,
        _device: vk::PhysicalDevice,
        _surface: vk::SurfaceKHR,
    ) -> VkResult<vk::SurfaceCapabilitiesKHR> {
        Ok(vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 8,
            current_extent: vk::Extent2D { width: 640, height: 480 },
            supported_usage_flags: vk::ImageUsageFlags::COLOR_ATTACHMENT,
            ..Default::default()
        })
    }

    fn physical_device_surface_present_modes(
        &self,
        device: vk::PhysicalDevice,
        _surface: vk::SurfaceKHR,
        count: &mut u32,
        modes: Option<&mut [vk::PresentModeKHR]>,
    ) -> vk::Result {
        fill(&self.device(device).present_modes, count, modes)
    }

    fn physical_device_surface_support(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
        _surface: vk::SurfaceKHR,
    ) -> VkResult<bool> {
        Ok(self
            .device(device)
            .present_support
            .get(queue_family_index as usize)
            .copied()
            .unwrap_or(false))
    }

    fn create_surface(&self, target: &SurfaceTarget) -> VkResult<vk::SurfaceKHR> {
        self.record(format!("create_surface {}", target.extension_name()));
        if self.surface_result != vk::Result::SUCCESS {
            return Err(self.surface_result);
        }
        Ok(vk::SurfaceKHR::from_raw(MOCK_SURFACE))
    }

    fn destroy_surface(&self, _surface: vk::SurfaceKHR) {
        self.record("destroy_surface");
    }

    fn create_debug_messenger(&self) -> VkResult<vk::DebugUtilsMessengerEXT> {
        self.record("create_debug_messenger");
        Ok(vk::DebugUtilsMessengerEXT::from_raw(0x9))
    }

    fn destroy_debug_messenger(&self, _messenger: vk::DebugUtilsMessengerEXT) {
        self.record("destroy_debug_messenger");
    }

    fn destroy_instance(&mut self) {
        self.record("destroy_instance");
    }
}
