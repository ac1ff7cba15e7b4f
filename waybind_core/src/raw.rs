use core::mem;

/// erased C function pointer, the assumed element type of every listener table
pub type RawSlot = unsafe extern "C" fn();

/// number of pointer-width slots in a raw listener table
///
/// this is byte size over pointer width, nothing more: a table whose fields are not
/// all function pointers still divides cleanly and silently yields a wrong count.
/// kinds declared through [`kinds!`](crate::kinds) cross-check this against their
/// declared slot list at compile time.
pub const fn slot_count<T>() -> usize {
    mem::size_of::<T>() / mem::size_of::<Option<RawSlot>>()
}

/// reads a listener table as its ordered run of erased function pointers
///
/// purely structural; the concrete shape of `T` does not need to be known, only
/// that it satisfies the precondition below.
///
/// SAFETY: `T` must consist solely of `slot_count::<T>()` C function pointer fields
/// (nullable or not) in declaration order, with no padding and no other fields.
pub unsafe fn decompose<T>(table: &T) -> Vec<Option<RawSlot>> {
    let base = (table as *const T).cast::<Option<RawSlot>>();
    (0..slot_count::<T>()).map(|i| base.add(i).read()).collect()
}
