/// one reassignable handler position; `None` is the no-op default
///
/// `F` is the slot's `dyn FnMut(..)` signature, always taking the opaque context
/// pointer first, mirroring the raw callback convention.
pub type Slot<F: ?Sized> = Option<Box<F>>;

/// the dispatch step every synthesized trampoline runs
///
/// the closure is moved out of the slot for the duration of the call and put back
/// afterwards only if the slot is still empty. the consequences are exactly the
/// slot semantics callers get to rely on:
///
/// - an empty slot is a no-op for any arguments
/// - a handler that replaces its own slot keeps executing untouched; the
///   replacement is observed by the next invocation, last write wins
/// - a nested event for the same slot during its own invocation is a no-op
///
/// SAFETY: `slot` must point to live slot storage and no reference to it may be
/// held across this call.
pub unsafe fn fire<F>(slot: *mut Slot<F>, invoke: impl FnOnce(&mut F))
where
    F: ?Sized,
{
    let Some(mut f) = (*slot).take() else {
        return;
    };
    invoke(&mut f);

    let current = &mut *slot;
    if current.is_none() {
        *current = Some(f);
    }
}
