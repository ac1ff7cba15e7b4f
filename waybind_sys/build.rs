fn main() {
    // only pull in the system library when the caller asked for it;
    // the default build must not require wayland to be installed
    if std::env::var_os("CARGO_FEATURE_SYSTEM").is_some() {
        println!("cargo:rustc-link-lib=wayland-client");
    }
}
