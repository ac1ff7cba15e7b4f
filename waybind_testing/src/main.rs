//! demo client: connect, bind the registry, print every announced global
//!
//! build with `--features wayland` on a machine with libwayland-client and a
//! running compositor.

#[cfg(feature = "wayland")]
fn main() -> waybind_core::Result<()> {
    use std::ffi::CStr;

    use waybind_core::wayland;

    env_logger::init();

    let display = wayland::connect()?;
    let mut registry = wayland::get_registry(&display)?;

    registry.slots_mut()?.global = Some(Box::new(|_ctx, _registry, name, interface, version| {
        // interface names are static strings owned by the library
        let interface = unsafe { CStr::from_ptr(interface) };
        println!("{name}: {} v{version}", interface.to_string_lossy());
    }));
    registry.slots_mut()?.global_remove = Some(Box::new(|_ctx, _registry, name| {
        println!("removed: {name}");
    }));

    let mut sync = wayland::sync(&display)?;
    sync.slots_mut()?.done = Some(Box::new(|_ctx, _callback, serial| {
        println!("queue drained at serial {serial}");
    }));

    // no slot borrows are live here, so dispatching is fine
    unsafe { wayland::roundtrip(&display)? };

    log::debug!("done, tearing down");
    Ok(())
}

#[cfg(not(feature = "wayland"))]
fn main() {
    eprintln!("rebuild with `--features wayland` to run the demo against a compositor");
}
