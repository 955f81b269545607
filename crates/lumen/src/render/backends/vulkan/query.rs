//! Two-phase count-then-fetch enumeration
//!
//! Vulkan reports variable-length data by being called twice: once with no
//! output buffer to learn the element count, then again with a buffer of that
//! size. Queue families, extensions, layers, surface formats, present modes
//! and physical devices are all read through [`two_phase`].

use std::convert::Infallible;
use std::panic::Location;

use ash::vk;

use super::check::check_at;
use super::VulkanResult;

/// Query a count, allocate a buffer of that size, then query into it.
///
/// `query` receives the element count and an optional output buffer, the
/// same shape as the underlying entry point. The returned vector is truncated
/// to the count written by the second call.
pub fn two_phase<T, E, F>(mut query: F) -> Result<Vec<T>, E>
where
    T: Default + Clone,
    F: FnMut(&mut u32, Option<&mut [T]>) -> Result<(), E>,
{
    let mut count = 0;
    query(&mut count, None)?;

    let mut items = vec![T::default(); count as usize];
    query(&mut count, Some(items.as_mut_slice()))?;
    items.truncate(count as usize);

    Ok(items)
}

/// Two-phase query over an entry point that returns a result code.
///
/// Both calls are checked; failures are attributed to the caller's location.
#[track_caller]
pub fn enumerate<T, F>(call: &'static str, mut query: F) -> VulkanResult<Vec<T>>
where
    T: Default + Clone,
    F: FnMut(&mut u32, Option<&mut [T]>) -> vk::Result,
{
    let location = Location::caller();
    two_phase(|count, items| check_at(call, location, query(count, items)))
}

/// Two-phase query over an entry point that cannot fail
pub fn enumerate_infallible<T, F>(mut query: F) -> Vec<T>
where
    T: Default + Clone,
    F: FnMut(&mut u32, Option<&mut [T]>),
{
    let result: Result<Vec<T>, Infallible> = two_phase(|count, items| {
        query(count, items);
        Ok(())
    });
    match result {
        Ok(items) => items,
        Err(never) => match never {},
    }
}
