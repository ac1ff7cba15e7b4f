//! kind declarations over the real client library
//!
//! declared here: the connection and the interfaces the demo drives (registry,
//! sync callback), plus the seat as the smallest two-slot input shape. the
//! remaining input interfaces (keyboard, pointer, touch) are one `kinds!` entry
//! plus a table declaration in `waybind_sys` each, when something needs them.

use core::ptr;

use waybind_sys as sys;

use crate::binding::{Binding, Handle};
use crate::error::{BindError, Result};
use crate::kinds;

kinds! {
    /// the connection itself; it delivers no events through a listener table
    pub kind Display: sys::wl_display {
        destroy = sys::wl_display_disconnect;
    }

    /// announces and withdraws global objects
    pub kind Registry: sys::wl_registry {
        destroy = sys::wl_registry_destroy;
        listener = sys::wl_registry_listener;
        slots = RegistrySlots {
            global(
                wl_registry: *mut sys::wl_registry,
                name: u32,
                interface: *const core::ffi::c_char,
                version: u32
            ),
            global_remove(wl_registry: *mut sys::wl_registry, name: u32),
        };
        attach = sys::wl_registry_add_listener;
    }

    /// one-shot completion notification
    pub kind Callback: sys::wl_callback {
        destroy = sys::wl_callback_destroy;
        listener = sys::wl_callback_listener;
        slots = CallbackSlots {
            done(wl_callback: *mut sys::wl_callback, callback_data: u32),
        };
        attach = sys::wl_callback_add_listener;
    }

    /// a group of input devices
    pub kind Seat: sys::wl_seat {
        destroy = sys::wl_seat_destroy;
        listener = sys::wl_seat_listener;
        slots = SeatSlots {
            capabilities(wl_seat: *mut sys::wl_seat, capabilities: u32),
            name(wl_seat: *mut sys::wl_seat, name: *const core::ffi::c_char),
        };
        attach = sys::wl_seat_add_listener;
    }
}

/// connects to the default display
pub fn connect() -> Result<Handle<Display>> {
    // SAFETY: plain entry point; a null name selects $WAYLAND_DISPLAY
    Handle::try_from_raw(unsafe { sys::wl_display_connect(ptr::null()) })
}

/// binds the display's registry
pub fn get_registry(display: &Handle<Display>) -> Result<Binding<Registry>> {
    if !display.is_valid() {
        return Err(BindError::Unbound);
    }
    // SAFETY: display handle is live
    Binding::try_from_raw(unsafe { sys::wl_display_get_registry(display.as_raw()) })
}

/// requests a one-shot `done` notification for the connection's event queue
pub fn sync(display: &Handle<Display>) -> Result<Binding<Callback>> {
    if !display.is_valid() {
        return Err(BindError::Unbound);
    }
    // SAFETY: display handle is live
    Binding::try_from_raw(unsafe { sys::wl_display_sync(display.as_raw()) })
}

/// blocks until all pending requests were processed, dispatching events (and
/// therefore trampolines) on the calling thread as a side effect
///
/// SAFETY: dispatch writes slot storage through each binding's registered
/// context pointer. no reference obtained from `slots`/`slots_mut` on any
/// binding of this connection may be live across this call; a borrow held
/// across it would alias the trampolines' writes.
///
/// ```compile_fail
/// fn pump(display: &waybind_core::Handle<waybind_core::wayland::Display>) {
///     // dispatch is an unsafe operation; this must not compile without a block
///     waybind_core::wayland::roundtrip(display).unwrap();
/// }
/// ```
pub unsafe fn roundtrip(display: &Handle<Display>) -> Result<()> {
    if !display.is_valid() {
        return Err(BindError::Unbound);
    }
    let code = sys::wl_display_roundtrip(display.as_raw());
    if code < 0 {
        return Err(BindError::Dispatch(code));
    }
    Ok(())
}
