//! Result checking for Vulkan calls
//!
//! Every driver call in this crate funnels its result through [`check`] or
//! [`check_value`]. A non-success code is logged with the entry point name,
//! the caller's source location and the raw result, then returned as
//! [`VulkanError::CallFailed`] for the caller to propagate.

use std::panic::Location;

use ash::prelude::VkResult;
use ash::vk;

use super::{VulkanError, VulkanResult};

/// Verify the result code of a Vulkan call
#[track_caller]
pub fn check(call: &'static str, result: vk::Result) -> VulkanResult<()> {
    check_at(call, Location::caller(), result)
}

/// Unwrap the value of a Vulkan call, reporting failures like [`check`]
#[track_caller]
pub fn check_value<T>(call: &'static str, result: VkResult<T>) -> VulkanResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(code) => Err(failure(call, Location::caller(), code)),
    }
}

/// Verify a result code against an explicit call-site location
pub fn check_at(
    call: &'static str,
    location: &'static Location<'static>,
    result: vk::Result,
) -> VulkanResult<()> {
    if result == vk::Result::SUCCESS {
        Ok(())
    } else {
        Err(failure(call, location, result))
    }
}

fn failure(
    call: &'static str,
    location: &'static Location<'static>,
    result: vk::Result,
) -> VulkanError {
    let error = VulkanError::CallFailed {
        call,
        location,
        result,
    };
    log::error!("{error}");
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes() {
        assert!(check("vkTest", vk::Result::SUCCESS).is_ok());
        assert_eq!(check_value("vkTest", Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_failure_reports_call_site() {
        let line = line!() + 1;
        let error = check("vkCreateInstance", vk::Result::ERROR_INITIALIZATION_FAILED).unwrap_err();

        match error {
            VulkanError::CallFailed {
                call,
                location,
                result,
            } => {
                assert_eq!(call, "vkCreateInstance");
                assert_eq!(result, vk::Result::ERROR_INITIALIZATION_FAILED);
                assert_eq!(location.line(), line);
                assert!(location.file().ends_with("check.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_success_codes_are_failures() {
        // Positive codes such as VK_INCOMPLETE still count as failures
        let error = check_value::<()>("vkEnumerate", Err(vk::Result::INCOMPLETE)).unwrap_err();
        assert_eq!(error.result(), Some(vk::Result::INCOMPLETE));
        assert!(error.to_string().contains("vkEnumerate"));
    }
}
