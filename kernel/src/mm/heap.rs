//! Kernel heap allocator bring-up.
//!
//! Owns the global allocator backing `alloc::*` for the rest of the kernel,
//! and exposes the `kmalloc`/`kzmalloc` facade that early subsystems (the
//! terminal in particular) use once at initialization instead of reaching
//! for `Vec`/`Box` directly, matching how allocation failure is handled as
//! a first-class, checkable outcome rather than an infallible `Box::new`.

use core::{alloc::Layout, ptr::NonNull};

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
use linked_list_allocator::LockedHeap;

/// Static backing storage for the kernel heap on bare-metal x86_64 targets.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
static mut HEAP_MEMORY: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

/// Kernel heap size.
pub const HEAP_SIZE: usize = 1024 * 1024;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Initialize the kernel heap. Must be called exactly once, early in boot,
/// before any subsystem allocates.
///
/// # Safety
/// Must be called exactly once, with interrupts disabled, before any other
/// code allocates from the global allocator.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub unsafe fn init() {
    // SAFETY: HEAP_MEMORY is a process-lifetime static used by no other
    // code; the caller guarantees this runs exactly once before any
    // allocation.
    unsafe {
        let heap_start = core::ptr::addr_of_mut!(HEAP_MEMORY) as *mut u8;
        ALLOCATOR.lock().init(heap_start, HEAP_SIZE);
    }
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
pub fn init() {
    // Host/test builds delegate to the system allocator (wired in lib.rs);
    // there is no bump-heap region to initialize.
}

/// Allocate `layout` bytes from the kernel heap, uninitialized.
///
/// Returns `None` on allocation failure instead of aborting, so callers
/// (chiefly terminal init) can fall back to a static buffer.
pub fn kmalloc(layout: Layout) -> Option<NonNull<u8>> {
    // SAFETY: `layout` is well-formed (came from `Layout::new`/`array`), and
    // the returned pointer, if non-null, is valid for `layout.size()` bytes
    // per `GlobalAlloc::alloc`'s contract.
    let ptr = unsafe { alloc::alloc::alloc(layout) };
    NonNull::new(ptr)
}

/// Allocate `layout` bytes from the kernel heap, zeroed.
pub fn kzmalloc(layout: Layout) -> Option<NonNull<u8>> {
    // SAFETY: see `kmalloc`; `alloc_zeroed` additionally guarantees the
    // memory is zero-filled.
    let ptr = unsafe { alloc::alloc::alloc_zeroed(layout) };
    NonNull::new(ptr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kzmalloc_is_zeroed() {
        let layout = Layout::array::<u8>(64).unwrap();
        let ptr = kzmalloc(layout).expect("allocation should succeed in host tests");
        // SAFETY: `ptr` was just allocated with `layout` above.
        let slice = unsafe { core::slice::from_raw_parts(ptr.as_ptr(), 64) };
        assert!(slice.iter().all(|&b| b == 0));
        // SAFETY: freeing with the same layout used to allocate.
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
