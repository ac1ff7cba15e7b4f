//! closure-backed listener bindings for C callback tables
//!
//! an external C API delivers events through a struct of raw function pointers (a
//! listener table) registered once together with an opaque context pointer. this
//! crate owns that shape: declare a *kind* once with [`kinds!`], then wrap a raw
//! handle in a [`Binding`] and assign closures to its slots. the registered table is
//! filled with synthesized trampolines that recover the binding from the context
//! pointer and forward to whatever closure currently occupies the matching slot.
//!
//! dispatch is single threaded: the external poll call drives the trampolines on the
//! thread that owns the binding, and nothing here locks. `Binding` and `Handle` hold
//! raw pointers and are `!Send`/`!Sync` as a consequence.

/// compile-time registry of event-source kinds
pub mod kind;

/// structural decomposition of raw listener tables
pub mod raw;

/// slot storage and the dispatch step shared by every trampoline
pub mod slots;

/// the `kinds!` declaration macro
pub mod trampoline;

/// owning wrappers around raw handles
pub mod binding;

/// error handling
pub mod error;

/// kind declarations for the real wayland client library
#[cfg(feature = "wayland")]
pub mod wayland;

pub use binding::{Binding, Handle};
pub use error::{BindError, Result};
pub use kind::{Dispatch, Kind};
