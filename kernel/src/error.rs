//! Kernel error types.
//!
//! Mirrors the rest of this kernel's convention of typed errors instead of
//! string literals. The terminal subsystem is infallible by contract from a
//! caller's perspective (see the terminal module's error handling notes), so
//! this enum only covers the one internal seam worth reporting as a typed
//! value: the action queue's capacity invariant. Allocation failure at init
//! is handled by the failsafe fallback path plus a `log::warn!`, not by this
//! type, since it is never something a caller branches on.

use core::fmt;

/// Kernel error type shared by the subsystems in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "kernel errors must be handled, not silently discarded"]
pub enum KernelError {
    /// A resource with a fixed capacity was exhausted.
    ResourceExhausted { resource: &'static str },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted { resource } => {
                write!(f, "resource exhausted: {}", resource)
            }
        }
    }
}
