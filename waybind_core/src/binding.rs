use core::any::type_name;
use core::ffi::c_void;
use core::mem;
use core::ptr::{self, NonNull};

use log::{debug, trace, warn};

use crate::error::{BindError, Result};
use crate::kind::{Dispatch, Kind};

/// scoped owner of one raw handle
///
/// the kind's destructor runs exactly once when the handle is dropped, on every
/// exit path. kinds without a listener shape are used through this directly;
/// [`Binding`] embeds one for its own handle.
pub struct Handle<K: Kind> {
    raw: Option<NonNull<K::Raw>>,
}

impl<K: Kind> Handle<K> {
    /// takes ownership of `raw`; a null pointer yields an invalid handle that
    /// releases nothing on drop
    pub fn from_raw(raw: *mut K::Raw) -> Self {
        Self {
            raw: NonNull::new(raw),
        }
    }

    /// like [`from_raw`](Self::from_raw) but a null pointer is an error
    pub fn try_from_raw(raw: *mut K::Raw) -> Result<Self> {
        NonNull::new(raw)
            .map(|raw| Self { raw: Some(raw) })
            .ok_or(BindError::NullHandle)
    }

    /// true iff a live handle is owned
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }

    /// the owned raw handle, null when invalid; for passing into the external API
    pub fn as_raw(&self) -> *mut K::Raw {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// gives the handle up without running the destructor
    pub fn into_raw(mut self) -> *mut K::Raw {
        let raw = self.raw.take().map_or(ptr::null_mut(), NonNull::as_ptr);
        mem::forget(self);
        raw
    }
}

impl<K: Kind> Drop for Handle<K> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            trace!("releasing {} handle", type_name::<K>());
            // SAFETY: we are the sole owner and this runs at most once
            unsafe { K::destroy(raw) };
        }
    }
}

/// everything the opaque context pointer points at, in one heap block
///
/// field order is load-bearing: dropping the handle first makes the external API
/// stop invoking trampolines before the table and slot storage go away.
struct Shared<K: Dispatch> {
    handle: Handle<K>,
    table: K::Table,
    slots: K::Slots,
}

/// called by macro-generated `attach` impls when the external API refuses a
/// registration; a nonzero code usually means the handle already carried a
/// listener
#[doc(hidden)]
pub fn report_attach_failure(kind: &'static str, code: core::ffi::c_int) {
    warn!("{kind}: listener registration returned {code}, handle may already carry a listener");
}

/// recovers a binding's slot storage from the opaque context pointer
///
/// called by macro-synthesized trampolines only.
///
/// SAFETY: `data` must be the context pointer a [`Binding<K>`] registered and the
/// binding must still be alive.
#[doc(hidden)]
pub unsafe fn slots_from_ctx<K: Dispatch>(data: *mut c_void) -> *mut K::Slots {
    &raw mut (*data.cast::<Shared<K>>()).slots
}

/// owner of one raw handle, its listener table, and its handler slots
///
/// constructing a binding from a live handle synthesizes the kind's trampoline
/// table, defaults every slot to a no-op, and registers table plus context pointer
/// with the external API in one step. constructing from null yields the *unbound*
/// state: nothing is allocated and nothing is registered.
///
/// exactly one binding owns a given raw handle; the registered context pointer is
/// a non-owning back-reference used only to find the slots during dispatch.
pub struct Binding<K: Dispatch> {
    shared: Option<NonNull<Shared<K>>>,
}

impl<K: Dispatch> Binding<K> {
    /// wraps and registers `raw`; a null pointer yields an unbound binding
    pub fn from_raw(raw: *mut K::Raw) -> Self {
        let Some(handle) = NonNull::new(raw) else {
            return Self { shared: None };
        };

        let shared = Box::into_raw(Box::new(Shared::<K> {
            handle: Handle::from_raw(raw),
            table: K::synthesize(),
            slots: <K::Slots>::default(),
        }));

        // SAFETY: a freshly synthesized table decomposes to SLOTS entries
        debug_assert!({
            let entries = unsafe { crate::raw::decompose(&(*shared).table) };
            entries.len() == K::SLOTS && entries.iter().all(Option::is_some)
        });

        // SAFETY: handle is live, the table and the shared block stay at these
        // addresses until drop, and the block outlives the registration
        unsafe { K::attach(handle, &raw const (*shared).table, shared.cast::<c_void>()) };

        debug!(
            "bound {} with {} listener slot(s)",
            type_name::<K>(),
            K::SLOTS
        );

        Self {
            // SAFETY: Box::into_raw never returns null
            shared: Some(unsafe { NonNull::new_unchecked(shared) }),
        }
    }

    /// like [`from_raw`](Self::from_raw) but a null pointer is an error
    pub fn try_from_raw(raw: *mut K::Raw) -> Result<Self> {
        if raw.is_null() {
            return Err(BindError::NullHandle);
        }
        Ok(Self::from_raw(raw))
    }

    /// true iff the binding owns a live handle
    pub fn is_valid(&self) -> bool {
        self.shared.is_some()
    }

    /// the owned raw handle, null when unbound
    pub fn as_raw(&self) -> *mut K::Raw {
        // SAFETY: the shared block is alive as long as we are
        self.shared
            .map_or(ptr::null_mut(), |s| unsafe { &(*s.as_ptr()).handle }.as_raw())
    }

    /// the opaque context pointer handed to the external API, null when unbound
    ///
    /// this is the value every handler receives as its first argument
    pub fn context(&self) -> *mut c_void {
        self.shared
            .map_or(ptr::null_mut(), |s| s.as_ptr().cast::<c_void>())
    }

    /// writable access to the handler slots
    ///
    /// any slot may be reassigned at any time; the change is observed by the very
    /// next trampoline invocation, last write wins
    ///
    /// the borrow must end before the external poll call runs: dispatch reaches
    /// this same storage through the registered context pointer, not through the
    /// binding, and a reference held across dispatch would alias those writes
    pub fn slots_mut(&mut self) -> Result<&mut K::Slots> {
        match self.shared {
            // SAFETY: exclusive borrow of self, dispatch never runs concurrently
            Some(s) => Ok(unsafe { &mut (*s.as_ptr()).slots }),
            None => Err(BindError::Unbound),
        }
    }

    /// read-only view of the handler slots
    ///
    /// like [`slots_mut`](Self::slots_mut), the borrow must end before the
    /// external poll call runs
    pub fn slots(&self) -> Result<&K::Slots> {
        match self.shared {
            // SAFETY: shared block is alive as long as we are
            Some(s) => Ok(unsafe { &(*s.as_ptr()).slots }),
            None => Err(BindError::Unbound),
        }
    }
}

impl<K: Dispatch> Drop for Binding<K> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            debug!("unbinding {}", type_name::<K>());
            // SAFETY: sole owner; Shared drops the handle before table and slots,
            // so the external API is quiesced before slot storage is reclaimed
            unsafe { drop(Box::from_raw(shared.as_ptr())) };
        }
    }
}
