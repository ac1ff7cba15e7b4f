/// declares event-source kinds: their destructor and, optionally, their listener
/// shape as an explicit (slot name, signature) list
///
/// for every kind with a shape the macro expands one `unsafe extern "C" fn` per
/// declared slot. a trampoline's parameter list is the opaque context pointer
/// followed by the slot's declared arguments; its body recovers the owning
/// binding's slot storage from the context pointer and forwards everything,
/// context included, to whatever closure currently occupies its slot. the
/// trampoline-to-slot wiring is fixed at expansion time and identical across all
/// instances of the kind; only slot contents vary.
///
/// the declared slot list is authoritative for the shape, and a compile-time
/// assert checks it against the table's pointer-width size, so a table that grew a
/// field (or was never a plain run of function pointers) fails the build instead
/// of silently mis-counting.
///
/// handlers run inside an `extern "C"` frame; a panicking handler aborts the
/// process rather than unwinding into foreign code.
///
/// the `attach` entry point must follow the C registration convention and
/// return 0 on success. a nonzero code is reported through the log facade; it
/// usually means the handle already carried a listener, which violates the
/// one-binding-per-handle precondition.
///
/// ```
/// # #![allow(non_camel_case_types)]
/// use core::ffi::{c_int, c_void};
///
/// #[repr(C)]
/// pub struct tick_source {
///     _unused: [u8; 0],
/// }
///
/// #[repr(C)]
/// pub struct tick_listener {
///     pub tick: Option<unsafe extern "C" fn(data: *mut c_void, count: u32)>,
/// }
///
/// unsafe fn tick_destroy(_: *mut tick_source) {}
/// unsafe fn tick_add_listener(
///     _: *mut tick_source,
///     _: *const tick_listener,
///     _: *mut c_void,
/// ) -> c_int {
///     0
/// }
///
/// waybind_core::kinds! {
///     /// a source that counts upwards
///     pub kind Tick: tick_source {
///         destroy = tick_destroy;
///         listener = tick_listener;
///         slots = TickSlots {
///             tick(count: u32),
///         };
///         attach = tick_add_listener;
///     }
/// }
///
/// let mut source = tick_source { _unused: [] };
/// let mut binding = waybind_core::Binding::<Tick>::from_raw(&mut source);
/// binding.slots_mut().unwrap().tick = Some(Box::new(|_ctx, count| {
///     println!("tick {count}");
/// }));
/// ```
#[macro_export]
macro_rules! kinds {
    ($(
        $(#[$meta:meta])*
        $vis:vis kind $name:ident : $raw:ty {
            destroy = $destroy:path;
            $(
                listener = $table:path;
                slots = $slots:ident {
                    $( $slot:ident ( $( $arg:ident : $aty:ty ),* $(,)? ) ),+ $(,)?
                };
                attach = $attach:path;
            )?
        }
    )*) => {
        $(
            $(#[$meta])*
            $vis enum $name {}

            unsafe impl $crate::kind::Kind for $name {
                type Raw = $raw;

                unsafe fn destroy(raw: ::core::ptr::NonNull<$raw>) {
                    $destroy(raw.as_ptr());
                }
            }

            $(
                #[doc = ::core::concat!(
                    "handler slots for [`", ::core::stringify!($name), "`]"
                )]
                #[derive(Default)]
                $vis struct $slots {
                    $(
                        pub $slot: $crate::slots::Slot<
                            dyn FnMut(*mut ::core::ffi::c_void $(, $aty)*)
                        >,
                    )+
                }

                unsafe impl $crate::kind::Dispatch for $name {
                    type Table = $table;
                    type Slots = $slots;

                    const SLOTS: usize = [$( ::core::stringify!($slot) ),+].len();

                    fn synthesize() -> $table {
                        type __Table = $table;

                        $(
                            unsafe extern "C" fn $slot(
                                data: *mut ::core::ffi::c_void
                                $(, $arg: $aty)*
                            ) {
                                let slots = $crate::binding::slots_from_ctx::<$name>(data);
                                $crate::slots::fire(
                                    &raw mut (*slots).$slot,
                                    |f| f(data $(, $arg)*),
                                );
                            }
                        )+

                        __Table {
                            $( $slot: ::core::option::Option::Some($slot), )+
                        }
                    }

                    unsafe fn attach(
                        raw: ::core::ptr::NonNull<$raw>,
                        table: *const $table,
                        data: *mut ::core::ffi::c_void,
                    ) {
                        let code: ::core::ffi::c_int = $attach(raw.as_ptr(), table, data);
                        if code != 0 {
                            $crate::binding::report_attach_failure(
                                ::core::any::type_name::<$name>(),
                                code,
                            );
                        }
                    }
                }

                const _: () = ::core::assert!(
                    <$name as $crate::kind::Dispatch>::SLOTS
                        == $crate::raw::slot_count::<$table>(),
                    "declared slots do not cover the listener table"
                );
            )?
        )*
    };
}
