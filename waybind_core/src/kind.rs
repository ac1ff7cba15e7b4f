use core::ffi::c_void;
use core::ptr::NonNull;

/// one category of event source, fixing its raw handle type and destructor
///
/// kinds are uninhabited tag types; implementations are written by the
/// [`kinds!`](crate::kinds) macro and form the whole registry. using a type that
/// never got a declaration simply fails to compile, so there is no runtime lookup
/// and no mutable global state anywhere.
///
/// SAFETY: `destroy` must release the resource behind `raw` exactly once, and the
/// external API must stop invoking any listener registered on `raw` once it ran.
pub unsafe trait Kind {
    /// the opaque handle type the external API hands out
    type Raw;

    /// releases the raw resource
    unsafe fn destroy(raw: NonNull<Self::Raw>);
}

/// a kind that also carries a listener shape
///
/// SAFETY:
/// 1. `Table` must consist solely of `SLOTS` pointer-width C function pointers in
///    declaration order, matching the layout the external API dereferences.
/// 2. `synthesize` must fill every field of the table with a trampoline that expects
///    the registered context pointer to be the shared block of a
///    [`Binding<Self>`](crate::Binding).
/// 3. `attach` must hand `table` and `data` to the external API's listener
///    registration entry point for `raw`.
pub unsafe trait Dispatch: Kind {
    /// the raw listener table in C layout
    type Table: 'static;

    /// the per-instance slot storage, one field per table entry
    type Slots: Default + 'static;

    /// number of slots in the shape
    const SLOTS: usize;

    /// builds a table wired to this kind's trampolines
    ///
    /// the addresses written here are fixed for the lifetime of the program and
    /// identical across every instance of the kind; only slot contents vary.
    fn synthesize() -> Self::Table;

    /// registers `table` and the opaque context with the external API
    unsafe fn attach(raw: NonNull<Self::Raw>, table: *const Self::Table, data: *mut c_void);
}
