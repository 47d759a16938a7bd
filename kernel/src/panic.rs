//! Panic-state tracking.
//!
//! The terminal's init path needs to know whether it is being initialized
//! from within a panic (in which case it must not touch the heap allocator,
//! which may itself be the thing that panicked) — this is the `in_panic()`
//! collaborator the terminal spec treats as external.

use core::sync::atomic::{AtomicBool, Ordering};

static IN_PANIC: AtomicBool = AtomicBool::new(false);

/// Mark that a panic is in progress. Called at the top of the panic handler,
/// before anything else runs.
pub fn enter_panic() {
    IN_PANIC.store(true, Ordering::SeqCst);
}

/// True if a panic is currently being handled.
pub fn in_panic() -> bool {
    IN_PANIC.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_false_and_latches_true() {
        assert!(!in_panic());
        enter_panic();
        assert!(in_panic());
        // Reset so other tests in the same process aren't affected by
        // ordering; a real kernel never leaves this scope.
        IN_PANIC.store(false, Ordering::SeqCst);
    }
}
