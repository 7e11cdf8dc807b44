use std::ffi::c_void;

use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowLayer,
    kCGWindowListOptionAll, kCGWindowListOptionOnScreenOnly, kCGWindowOwnerPID,
    kCGWindowSharingState,
};
use tracing::debug;

use crate::window::server::{WindowServer, Windows};
use crate::window::types::{SharingState, WindowBounds, WindowRecord, WindowScope};

type WindowDictionary = CFDictionary<CFString, CFType>;

/// Window server backed by `CGWindowListCopyWindowInfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreGraphicsWindowServer;

impl WindowServer for CoreGraphicsWindowServer {
    fn backend_name(&self) -> &'static str {
        "core_graphics"
    }

    fn is_available(&self) -> bool {
        copy_window_info(kCGWindowListOptionOnScreenOnly, kCGNullWindowID).is_some()
    }

    fn list_windows(&self, scope: WindowScope) -> Windows<'_> {
        let option = match scope {
            WindowScope::OnScreenOnly => kCGWindowListOptionOnScreenOnly,
            WindowScope::All => kCGWindowListOptionAll,
        };

        let Some(windows) = copy_window_info(option, kCGNullWindowID) else {
            debug!(event = "core.window.server_unavailable", scope = ?scope);
            return Box::new(std::iter::empty());
        };

        let len = windows.len();
        Box::new((0..len).filter_map(move |index| {
            let item = windows.get(index)?;
            parse_window(*item)
        }))
    }
}

fn lookup(dict: &WindowDictionary, key: CFStringRef) -> Option<CFType> {
    // SAFETY: key is one of the CoreGraphics constant strings, valid for the process lifetime.
    let key = unsafe { CFString::wrap_under_get_rule(key) };
    dict.find(&key).map(|value| CFType::clone(&value))
}

fn lookup_named(dict: &WindowDictionary, key: &'static str) -> Option<CFType> {
    let key = CFString::from_static_string(key);
    dict.find(&key).map(|value| CFType::clone(&value))
}

fn as_number(value: Option<CFType>) -> Option<CFNumber> {
    value?.downcast::<CFNumber>()
}

fn as_dictionary(value: CFType) -> Option<WindowDictionary> {
    if value.type_of() != WindowDictionary::type_id() {
        return None;
    }
    // SAFETY: the type id check above guarantees this is a CFDictionary; get rule retains it.
    Some(unsafe { WindowDictionary::wrap_under_get_rule(value.as_CFTypeRef() as CFDictionaryRef) })
}

fn parse_bounds(dict: &WindowDictionary) -> Option<WindowBounds> {
    let field = |name| as_number(lookup_named(dict, name))?.to_f64();
    Some(WindowBounds::new(
        field("X")?,
        field("Y")?,
        field("Width")?,
        field("Height")?,
    ))
}

fn parse_window(raw: *const c_void) -> Option<WindowRecord> {
    if raw.is_null() {
        return None;
    }
    // SAFETY: CGWindowListCopyWindowInfo returns an array of CFDictionary values kept alive by the array.
    let dict = unsafe { WindowDictionary::wrap_under_get_rule(raw as CFDictionaryRef) };

    // SAFETY: reading CoreGraphics exported constant strings.
    let (owner_key, bounds_key, layer_key, sharing_key) = unsafe {
        (
            kCGWindowOwnerPID,
            kCGWindowBounds,
            kCGWindowLayer,
            kCGWindowSharingState,
        )
    };

    // Windows without an owner cannot be attributed to any process
    let owner_pid = as_number(lookup(&dict, owner_key))?.to_i32()?;

    let bounds = lookup(&dict, bounds_key)
        .and_then(as_dictionary)
        .and_then(|bounds| parse_bounds(&bounds));

    let layer = as_number(lookup(&dict, layer_key))
        .and_then(|n| n.to_i32())
        .unwrap_or(0);

    let sharing_state = as_number(lookup(&dict, sharing_key))
        .and_then(|n| n.to_i64())
        .map(SharingState::from_raw)
        .unwrap_or(SharingState::Capturable);

    Some(WindowRecord {
        owner_pid,
        bounds,
        layer,
        sharing_state,
    })
}
