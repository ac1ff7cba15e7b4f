//! hand-written client bindings for the wayland callback surface
//!
//! only the part of the ABI the binding layer actually touches is declared here:
//! opaque proxy handles, the listener tables (structs of C function pointers), and
//! the proxy entry points used to register a table and tear a proxy down.
//!
//! the `*_destroy`, `*_add_listener` and `wl_display_get_registry` functions are
//! static inlines in the C headers, not linkable symbols, so they are re-expressed
//! here as inline wrappers over the `wl_proxy_*` entry points.

#![allow(non_camel_case_types)]

use core::ffi::{c_char, c_void};

#[cfg(feature = "system")]
use core::ffi::c_int;

/// erased C function pointer, the element type of every listener table
pub type wl_raw_fn = unsafe extern "C" fn();

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_proxy {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_display {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_registry {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_callback {
    _unused: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_seat {
    _unused: [u8; 0],
}

/// protocol introspection record; only ever passed around by address
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct wl_interface {
    _unused: [u8; 0],
}

#[repr(C)]
pub struct wl_registry_listener {
    pub global: Option<
        unsafe extern "C" fn(
            data: *mut c_void,
            wl_registry: *mut wl_registry,
            name: u32,
            interface: *const c_char,
            version: u32,
        ),
    >,
    pub global_remove:
        Option<unsafe extern "C" fn(data: *mut c_void, wl_registry: *mut wl_registry, name: u32)>,
}

#[repr(C)]
pub struct wl_callback_listener {
    pub done: Option<
        unsafe extern "C" fn(data: *mut c_void, wl_callback: *mut wl_callback, callback_data: u32),
    >,
}

#[repr(C)]
pub struct wl_seat_listener {
    pub capabilities: Option<
        unsafe extern "C" fn(data: *mut c_void, wl_seat: *mut wl_seat, capabilities: u32),
    >,
    pub name:
        Option<unsafe extern "C" fn(data: *mut c_void, wl_seat: *mut wl_seat, name: *const c_char)>,
}

pub const WL_SEAT_CAPABILITY_POINTER: u32 = 1;
pub const WL_SEAT_CAPABILITY_KEYBOARD: u32 = 2;
pub const WL_SEAT_CAPABILITY_TOUCH: u32 = 4;

/// opcode of `wl_display.sync`
pub const WL_DISPLAY_SYNC: u32 = 0;

/// opcode of `wl_display.get_registry`
pub const WL_DISPLAY_GET_REGISTRY: u32 = 1;

#[cfg(feature = "system")]
extern "C" {
    pub static wl_registry_interface: wl_interface;
    pub static wl_callback_interface: wl_interface;

    pub fn wl_display_connect(name: *const c_char) -> *mut wl_display;
    pub fn wl_display_disconnect(display: *mut wl_display);
    pub fn wl_display_roundtrip(display: *mut wl_display) -> c_int;

    pub fn wl_proxy_destroy(proxy: *mut wl_proxy);
    pub fn wl_proxy_add_listener(
        proxy: *mut wl_proxy,
        implementation: *mut Option<wl_raw_fn>,
        data: *mut c_void,
    ) -> c_int;
    pub fn wl_proxy_marshal_constructor(
        proxy: *mut wl_proxy,
        opcode: u32,
        interface: *const wl_interface,
        ...
    ) -> *mut wl_proxy;
}

#[cfg(feature = "system")]
mod inline_wrappers {
    use super::*;

    /// `wl_display.get_registry` is a static inline in the generated C header,
    /// so marshal the request directly
    #[inline]
    pub unsafe fn wl_display_get_registry(display: *mut wl_display) -> *mut wl_registry {
        wl_proxy_marshal_constructor(
            display.cast::<wl_proxy>(),
            WL_DISPLAY_GET_REGISTRY,
            &wl_registry_interface,
            core::ptr::null_mut::<c_void>(),
        )
        .cast::<wl_registry>()
    }

    /// `wl_display.sync` is a static inline in the generated C header as well
    #[inline]
    pub unsafe fn wl_display_sync(display: *mut wl_display) -> *mut wl_callback {
        wl_proxy_marshal_constructor(
            display.cast::<wl_proxy>(),
            WL_DISPLAY_SYNC,
            &wl_callback_interface,
            core::ptr::null_mut::<c_void>(),
        )
        .cast::<wl_callback>()
    }

    #[inline]
    pub unsafe fn wl_registry_destroy(registry: *mut wl_registry) {
        wl_proxy_destroy(registry.cast::<wl_proxy>());
    }

    #[inline]
    pub unsafe fn wl_registry_add_listener(
        registry: *mut wl_registry,
        listener: *const wl_registry_listener,
        data: *mut c_void,
    ) -> c_int {
        wl_proxy_add_listener(
            registry.cast::<wl_proxy>(),
            listener.cast_mut().cast::<Option<wl_raw_fn>>(),
            data,
        )
    }

    #[inline]
    pub unsafe fn wl_callback_destroy(callback: *mut wl_callback) {
        wl_proxy_destroy(callback.cast::<wl_proxy>());
    }

    #[inline]
    pub unsafe fn wl_callback_add_listener(
        callback: *mut wl_callback,
        listener: *const wl_callback_listener,
        data: *mut c_void,
    ) -> c_int {
        wl_proxy_add_listener(
            callback.cast::<wl_proxy>(),
            listener.cast_mut().cast::<Option<wl_raw_fn>>(),
            data,
        )
    }

    #[inline]
    pub unsafe fn wl_seat_destroy(seat: *mut wl_seat) {
        wl_proxy_destroy(seat.cast::<wl_proxy>());
    }

    #[inline]
    pub unsafe fn wl_seat_add_listener(
        seat: *mut wl_seat,
        listener: *const wl_seat_listener,
        data: *mut c_void,
    ) -> c_int {
        wl_proxy_add_listener(
            seat.cast::<wl_proxy>(),
            listener.cast_mut().cast::<Option<wl_raw_fn>>(),
            data,
        )
    }
}

#[cfg(feature = "system")]
pub use inline_wrappers::*;
