//! end-to-end checks against a stand-in external api: a couple of C-layout event
//! sources whose obtain/register/destroy/poll entry points are plain Rust
//! functions recording what the "library" saw.

#![allow(non_camel_case_types)]

use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use waybind_core::raw::decompose;
use waybind_core::{BindError, Binding, Dispatch, Handle};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn record(ev: &str) {
    EVENTS.with(|e| e.borrow_mut().push(ev.to_owned()));
}

fn take_events() -> Vec<String> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// records its message when slot storage is reclaimed
struct DropTag(&'static str);

impl Drop for DropTag {
    fn drop(&mut self) {
        record(self.0);
    }
}

// ---- a two-slot source announcing membership changes ----

#[repr(C)]
struct roster {
    listener: *const roster_listener,
    ctx: *mut c_void,
}

#[repr(C)]
struct roster_listener {
    added: Option<unsafe extern "C" fn(data: *mut c_void, value: u32)>,
    removed: Option<unsafe extern "C" fn(data: *mut c_void, value: u32)>,
}

fn roster_obtain() -> *mut roster {
    Box::into_raw(Box::new(roster {
        listener: ptr::null(),
        ctx: ptr::null_mut(),
    }))
}

unsafe fn roster_destroy(r: *mut roster) {
    record("destroy roster");
    drop(Box::from_raw(r));
}

unsafe fn roster_add_listener(r: *mut roster, l: *const roster_listener, ctx: *mut c_void) -> i32 {
    record("register roster");
    (*r).listener = l;
    (*r).ctx = ctx;
    0
}

/// poll stand-in delivering one `added` event
unsafe fn roster_poll_added(r: *mut roster, value: u32) {
    let l = &*(*r).listener;
    if let Some(f) = l.added {
        f((*r).ctx, value);
    }
}

/// poll stand-in delivering one `removed` event
unsafe fn roster_poll_removed(r: *mut roster, value: u32) {
    let l = &*(*r).listener;
    if let Some(f) = l.removed {
        f((*r).ctx, value);
    }
}

// ---- a one-slot source ----

#[repr(C)]
struct clock {
    listener: *const clock_listener,
    ctx: *mut c_void,
}

#[repr(C)]
struct clock_listener {
    tick: Option<unsafe extern "C" fn(data: *mut c_void, now: u64)>,
}

fn clock_obtain() -> *mut clock {
    Box::into_raw(Box::new(clock {
        listener: ptr::null(),
        ctx: ptr::null_mut(),
    }))
}

unsafe fn clock_destroy(c: *mut clock) {
    record("destroy clock");
    drop(Box::from_raw(c));
}

unsafe fn clock_add_listener(c: *mut clock, l: *const clock_listener, ctx: *mut c_void) -> i32 {
    record("register clock");
    (*c).listener = l;
    (*c).ctx = ctx;
    0
}

unsafe fn clock_poll_tick(c: *mut clock, now: u64) {
    let l = &*(*c).listener;
    if let Some(f) = l.tick {
        f((*c).ctx, now);
    }
}

// ---- a source whose registration entry point refuses ----

#[repr(C)]
struct gate {
    listener: *const gate_listener,
    ctx: *mut c_void,
}

#[repr(C)]
struct gate_listener {
    opened: Option<unsafe extern "C" fn(data: *mut c_void, value: u32)>,
}

fn gate_obtain() -> *mut gate {
    Box::into_raw(Box::new(gate {
        listener: ptr::null(),
        ctx: ptr::null_mut(),
    }))
}

unsafe fn gate_destroy(g: *mut gate) {
    record("destroy gate");
    drop(Box::from_raw(g));
}

unsafe fn gate_add_listener(_g: *mut gate, _l: *const gate_listener, _ctx: *mut c_void) -> i32 {
    record("register gate refused");
    -1
}

waybind_core::kinds! {
    kind Roster: roster {
        destroy = roster_destroy;
        listener = roster_listener;
        slots = RosterSlots {
            added(value: u32),
            removed(value: u32),
        };
        attach = roster_add_listener;
    }

    kind Clock: clock {
        destroy = clock_destroy;
        listener = clock_listener;
        slots = ClockSlots {
            tick(now: u64),
        };
        attach = clock_add_listener;
    }

    kind Gate: gate {
        destroy = gate_destroy;
        listener = gate_listener;
        slots = GateSlots {
            opened(value: u32),
        };
        attach = gate_add_listener;
    }
}

#[test]
fn synthesized_tables_decompose_in_declaration_order() {
    let two = Roster::synthesize();
    let got = unsafe { decompose(&two) };
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].map(|f| f as usize), two.added.map(|f| f as usize));
    assert_eq!(got[1].map(|f| f as usize), two.removed.map(|f| f as usize));

    let one = Clock::synthesize();
    let got = unsafe { decompose(&one) };
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].map(|f| f as usize), one.tick.map(|f| f as usize));
}

#[test]
fn trampoline_addresses_are_fixed_per_kind() {
    let a = unsafe { decompose(&Roster::synthesize()) };
    let b = unsafe { decompose(&Roster::synthesize()) };
    assert_eq!(
        a.iter().map(|f| f.map(|f| f as usize)).collect::<Vec<_>>(),
        b.iter().map(|f| f.map(|f| f as usize)).collect::<Vec<_>>(),
    );
}

#[test]
fn binding_from_live_handle_is_valid_and_registered() {
    let raw = roster_obtain();
    let binding = Binding::<Roster>::from_raw(raw);

    assert!(binding.is_valid());
    assert_eq!(binding.as_raw(), raw);
    assert!(!binding.context().is_null());
    assert_eq!(take_events(), ["register roster"]);

    // the fake library saw the table and the binding's own context pointer
    unsafe {
        assert_eq!((*raw).ctx, binding.context());
        assert!(!(*raw).listener.is_null());
    }

    drop(binding);
    assert_eq!(take_events(), ["destroy roster"]);
}

#[test]
fn null_obtain_yields_unbound_binding() {
    let mut binding = Binding::<Roster>::from_raw(ptr::null_mut());

    assert!(!binding.is_valid());
    assert!(binding.as_raw().is_null());
    assert!(binding.context().is_null());
    assert!(matches!(binding.slots_mut(), Err(BindError::Unbound)));
    assert!(matches!(
        Binding::<Roster>::try_from_raw(ptr::null_mut()),
        Err(BindError::NullHandle)
    ));

    drop(binding);
    // no registration was attempted and destruction released nothing
    assert_eq!(take_events(), Vec::<String>::new());
}

#[test]
fn unassigned_slots_are_no_ops() {
    let mut binding = Binding::<Roster>::from_raw(roster_obtain());
    let raw = binding.as_raw();

    unsafe {
        roster_poll_added(raw, 1);
        roster_poll_removed(raw, 2);
    }

    drop(binding);
    assert_eq!(take_events(), ["register roster", "destroy roster"]);
}

#[test]
fn dispatch_always_runs_the_current_slot_content() {
    let hits: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut binding = Binding::<Roster>::from_raw(roster_obtain());
    let raw = binding.as_raw();

    let h = hits.clone();
    binding.slots_mut().unwrap().added = Some(Box::new(move |_, value| {
        h.borrow_mut().push(format!("first:{value}"));
    }));
    unsafe { roster_poll_added(raw, 1) };

    // last write wins; the next invocation sees the replacement
    let h = hits.clone();
    binding.slots_mut().unwrap().added = Some(Box::new(move |_, value| {
        h.borrow_mut().push(format!("second:{value}"));
    }));
    unsafe { roster_poll_added(raw, 2) };

    assert_eq!(*hits.borrow(), ["first:1", "second:2"]);
}

#[test]
fn event_reaches_its_own_slot_only() {
    let calls: Rc<RefCell<Vec<(*mut c_void, u32)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut binding = Binding::<Roster>::from_raw(roster_obtain());
    let raw = binding.as_raw();

    // slot 0 stays default, slot 1 records its arguments
    let c = calls.clone();
    binding.slots_mut().unwrap().removed = Some(Box::new(move |ctx, value| {
        c.borrow_mut().push((ctx, value));
    }));

    unsafe { roster_poll_removed(raw, 42) };

    assert_eq!(*calls.borrow(), [(binding.context(), 42)]);
}

#[test]
fn one_slot_kind_dispatches() {
    let ticks: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let mut binding = Binding::<Clock>::from_raw(clock_obtain());
    let raw = binding.as_raw();

    let t = ticks.clone();
    binding.slots_mut().unwrap().tick = Some(Box::new(move |_, now| {
        t.borrow_mut().push(now);
    }));

    unsafe {
        clock_poll_tick(raw, 100);
        clock_poll_tick(raw, 200);
    }

    assert_eq!(*ticks.borrow(), [100, 200]);
}

#[test]
fn destructor_runs_before_slot_storage_is_reclaimed() {
    let mut binding = Binding::<Roster>::from_raw(roster_obtain());

    let tag = DropTag("slot storage freed");
    binding.slots_mut().unwrap().added = Some(Box::new(move |_, _| {
        let _ = &tag;
    }));

    drop(binding);
    assert_eq!(
        take_events(),
        ["register roster", "destroy roster", "slot storage freed"]
    );
}

#[test]
fn handle_owns_shapeless_kinds() {
    let handle = Handle::<Roster>::from_raw(roster_obtain());
    assert!(handle.is_valid());
    drop(handle);
    assert_eq!(take_events(), ["destroy roster"]);

    let invalid = Handle::<Roster>::from_raw(ptr::null_mut());
    assert!(!invalid.is_valid());
    assert!(invalid.as_raw().is_null());
    drop(invalid);
    assert_eq!(take_events(), Vec::<String>::new());
}

#[test]
fn into_raw_skips_the_destructor() {
    let handle = Handle::<Roster>::from_raw(roster_obtain());
    let raw = handle.into_raw();

    assert_eq!(take_events(), Vec::<String>::new());

    // ownership moved back to the caller
    unsafe { roster_destroy(raw) };
    assert_eq!(take_events(), ["destroy roster"]);
}

#[test]
fn refused_registration_still_yields_an_owning_binding() {
    let mut binding = Binding::<Gate>::from_raw(gate_obtain());

    // the refusal was observed but the handle is still owned and usable
    assert_eq!(take_events(), ["register gate refused"]);
    assert!(binding.is_valid());
    assert!(binding.slots_mut().is_ok());

    drop(binding);
    assert_eq!(take_events(), ["destroy gate"]);
}
