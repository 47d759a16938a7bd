//! Architecture-specific support. The terminal core itself is
//! backend-agnostic (see the `term` module); this module only supplies the
//! x86_64 I/O-port primitives the VGA backend's cursor control needs.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use self::x86_64::{inb, outb, without_interrupts, VGA_BUFFER_ADDRESS};

#[cfg(not(target_arch = "x86_64"))]
pub fn without_interrupts<F: FnOnce() -> R, R>(f: F) -> R {
    f()
}
