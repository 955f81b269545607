//! Capability negotiation
//!
//! Layers and extensions are negotiated the same way: whatever was requested
//! and is also available gets enabled.

use std::collections::HashSet;
use std::os::raw::c_char;

/// Intersect an available capability set with a requested one.
///
/// Returns the requested names that appear in `available`. Matching is exact
/// and case-sensitive; input order and duplicates have no effect.
pub fn filter_capabilities<A, R>(available: A, requested: R) -> HashSet<String>
where
    A: IntoIterator,
    A::Item: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let available: HashSet<String> = available
        .into_iter()
        .map(|name| name.as_ref().to_owned())
        .collect();

    requested
        .into_iter()
        .filter(|name| available.contains(name.as_ref()))
        .map(|name| name.as_ref().to_owned())
        .collect()
}

/// Read a NUL-terminated capability name out of a fixed-size Vulkan array
pub fn capability_name(raw: &[c_char]) -> String {
    #[allow(clippy::cast_sign_loss)]
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
