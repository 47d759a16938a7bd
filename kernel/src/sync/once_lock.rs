//! Safe global initialization.
//!
//! Provides safe alternatives to `static mut` for global state management,
//! built on atomic operations so they are sound from a no_std, interrupt-safe
//! context without requiring `const fn` trait bounds std's `OnceLock` needs.

#![allow(clippy::needless_lifetimes, mismatched_lifetime_syntaxes)]

use core::{
    cell::UnsafeCell,
    sync::atomic::{AtomicPtr, Ordering},
};

use spin::Mutex;

/// A cell that can be written to only once.
pub struct OnceLock<T> {
    inner: AtomicPtr<T>,
}

impl<T> Default for OnceLock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OnceLock<T> {
    /// Create a new empty `OnceLock`.
    pub const fn new() -> Self {
        Self {
            inner: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    /// Get the value if initialized.
    pub fn get(&self) -> Option<&'static T> {
        let ptr = self.inner.load(Ordering::Acquire);
        if ptr.is_null() {
            None
        } else {
            // SAFETY: A non-null pointer was stored by `set()` via
            // `Box::into_raw()`. The Acquire load synchronizes-with the
            // Release store in `set()`, so the pointee is fully initialized.
            // The allocation is only freed in `Drop`, so the 'static lifetime
            // is valid for the life of this `OnceLock`.
            Some(unsafe { &*ptr })
        }
    }

    /// Initialize the cell with a value.
    ///
    /// Returns `Ok(())` if initialization succeeds, `Err(value)` if already
    /// initialized.
    pub fn set(&self, value: T) -> Result<(), T> {
        let boxed = alloc::boxed::Box::new(value);
        let ptr = alloc::boxed::Box::into_raw(boxed);

        match self.inner.compare_exchange(
            core::ptr::null_mut(),
            ptr,
            Ordering::Release,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(_) => {
                // SAFETY: `ptr` came from `Box::into_raw()` above and the CAS
                // failed, so no one else observed or took ownership of it.
                // Reclaiming it here avoids leaking the allocation.
                let boxed = unsafe { alloc::boxed::Box::from_raw(ptr) };
                Err(*boxed)
            }
        }
    }

    /// Get or initialize the value.
    pub fn get_or_init<F>(&self, f: F) -> &'static T
    where
        F: FnOnce() -> T,
    {
        if let Some(val) = self.get() {
            return val;
        }

        let value = f();
        match self.set(value) {
            Ok(()) => self
                .get()
                .expect("OnceLock get failed after successful set"),
            Err(_) => self
                .get()
                .expect("OnceLock get failed after concurrent init"),
        }
    }
}

// SAFETY: the inner value is heap-allocated and reached only through an
// AtomicPtr with Acquire/Release ordering; transferring ownership is safe
// whenever T itself is Send.
unsafe impl<T: Send> Send for OnceLock<T> {}
// SAFETY: concurrent `get()` calls only ever hand out shared references, and
// the CAS in `set()` ensures at most one initialization succeeds, so sharing
// across threads is sound whenever T is Send + Sync.
unsafe impl<T: Send + Sync> Sync for OnceLock<T> {}

impl<T> Drop for OnceLock<T> {
    fn drop(&mut self) {
        let ptr = self.inner.load(Ordering::Acquire);
        if !ptr.is_null() {
            // SAFETY: `&mut self` guarantees exclusive access, so no other
            // thread can be reading `ptr` concurrently. Reconstructing the
            // Box reclaims the allocation made in `set()`.
            unsafe {
                let _ = alloc::boxed::Box::from_raw(ptr);
            }
        }
    }
}

/// Lazily-initialized global value.
pub struct LazyLock<T, F = fn() -> T> {
    cell: OnceLock<T>,
    init: UnsafeCell<Option<F>>,
}

impl<T: 'static, F: FnOnce() -> T> LazyLock<T, F> {
    /// Create a new `LazyLock` with the given initialization function.
    pub const fn new(init: F) -> Self {
        Self {
            cell: OnceLock::new(),
            init: UnsafeCell::new(Some(init)),
        }
    }

    /// Force initialization and return a reference to the value.
    pub fn force(&self) -> &T {
        self.cell.get_or_init(|| {
            // SAFETY: `get_or_init` on the inner OnceLock guarantees this
            // closure runs at most once, even under concurrent callers, so
            // the UnsafeCell access here never aliases.
            let init = unsafe { &mut *self.init.get() };
            match init.take() {
                Some(f) => f(),
                None => panic!("LazyLock initialization function called twice"),
            }
        })
    }
}

impl<T: 'static, F: FnOnce() -> T> core::ops::Deref for LazyLock<T, F> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.force()
    }
}

// SAFETY: the inner OnceLock synchronizes access to T, and F is consumed at
// most once via `take()`, so transferring ownership across threads is sound
// whenever both are Send.
unsafe impl<T: Send, F: Send> Send for LazyLock<T, F> {}
// SAFETY: the OnceLock's CAS ensures only one thread ever executes the init
// closure; F need only be Send since it is never shared, only consumed.
unsafe impl<T: Sync, F: Send> Sync for LazyLock<T, F> {}

/// Mutex-backed global state that can be initialized exactly once.
pub struct GlobalState<T> {
    inner: Mutex<Option<T>>,
}

impl<T> GlobalState<T> {
    /// Create a new, uninitialized global state cell.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Initialize the global state. Fails if already initialized.
    pub fn init(&self, value: T) -> Result<(), T> {
        let mut lock = self.inner.lock();
        if lock.is_some() {
            Err(value)
        } else {
            *lock = Some(value);
            Ok(())
        }
    }

    /// Run a closure with a shared reference, if initialized.
    pub fn with<R, F: FnOnce(&T) -> R>(&self, f: F) -> Option<R> {
        let lock = self.inner.lock();
        lock.as_ref().map(f)
    }

    /// Run a closure with an exclusive reference, if initialized.
    pub fn with_mut<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> Option<R> {
        let mut lock = self.inner.lock();
        lock.as_mut().map(f)
    }
}

impl<T> Default for GlobalState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: the inner spin::Mutex serializes all access to the Option<T>, so
// transferring ownership across threads is sound whenever T is Send.
unsafe impl<T: Send> Send for GlobalState<T> {}
// SAFETY: the Mutex guarantees exclusive access per-call, preventing any
// data race on the contained T; T need only be Send.
unsafe impl<T: Send> Sync for GlobalState<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_lock_set_get() {
        let lock = OnceLock::new();
        assert!(lock.get().is_none());

        assert!(lock.set(42).is_ok());
        assert_eq!(*lock.get().unwrap(), 42);

        assert!(lock.set(100).is_err());
    }

    #[test]
    fn lazy_lock_forces_once() {
        let lazy = LazyLock::new(|| 42);
        assert_eq!(*lazy, 42);
    }

    #[test]
    fn global_state_init_once() {
        let state: GlobalState<u32> = GlobalState::new();
        assert!(state.with(|v| *v).is_none());
        assert!(state.init(7).is_ok());
        assert!(state.init(8).is_err());
        assert_eq!(state.with(|v| *v), Some(7));
    }
}
