//! Memory management: kernel heap bring-up and the `kmalloc`/`kzmalloc`
//! facade used by early subsystems.

pub mod heap;

pub use heap::{kmalloc, kzmalloc};
