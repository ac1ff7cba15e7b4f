use thiserror::Error;

/// the few ways the binding layer itself can fail
///
/// kinds are resolved at compile time and dispatch has no failure path of its own,
/// so everything here is about handles the external API refused to produce.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BindError {
    /// the external API handed back a null handle
    #[error("external api returned a null handle")]
    NullHandle,

    /// slot access on a binding that holds no live handle
    #[error("binding is not bound to a live handle")]
    Unbound,

    /// the external poll/roundtrip call reported failure
    #[error("event dispatch failed (code {0})")]
    Dispatch(i32),
}

pub type Result<T> = core::result::Result<T, BindError>;
