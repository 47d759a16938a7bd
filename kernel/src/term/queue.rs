//! Bounded, re-entrant-safe action queue.
//!
//! Every public terminal operation constructs an action record and hands it
//! here. `enqueue` tells the caller whether the ring was empty before its
//! insertion: if so, the caller becomes the **drainer** and pops/executes
//! records in FIFO order until the ring is empty; otherwise it returns
//! immediately, trusting the in-progress drainer to pick up the new record.
//! This is the "first caller drains" pattern used so enqueue/drain are safe
//! to call from interrupt context without taking a lock.
//!
//! Adapted from this kernel's [`crate::sync::lockfree_queue`] (a
//! Michael-Scott style linked-list MPSC queue) to a fixed-capacity array of
//! records stored by value, since the action count here is bounded and
//! by-value storage avoids a per-action heap allocation from interrupt
//! context.

use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{error::KernelError, term::color::ColorCode};

/// More than this many nested interrupt-context enqueues before the
/// drainer catches up would imply a deeper systemic failure elsewhere.
pub const CAPACITY: usize = 32;

/// How many bytes of a `write`/`write_colored` call are carried inline in
/// one action record. Longer writes are split by the caller into several
/// enqueued chunks. Chosen so `Action` stays small and `Copy`, avoiding the
/// dangling-pointer hazard of storing a borrowed slice across a record that
/// may outlive the enqueuing stack frame under interrupt re-entrancy.
pub const WRITE_CHUNK_CAP: usize = 64;

#[derive(Clone, Copy)]
pub enum Action {
    Write {
        data: [u8; WRITE_CHUNK_CAP],
        len: u8,
        color: ColorCode,
    },
    MoveCursor {
        row: usize,
        col: usize,
    },
    ScrollUp {
        n: usize,
    },
    ScrollDown {
        n: usize,
    },
    /// Non-buffered content shift, independent of `ScrollUp`/`ScrollDown`'s
    /// viewport move. See `Terminal::non_buf_scroll_up`.
    NonBufScrollUp {
        n: usize,
    },
    NonBufScrollDown {
        n: usize,
    },
    SetColor {
        color: ColorCode,
    },
    SetColOffset {
        off: usize,
    },
    /// Swap in the null backend, saving the current one. Supplemented
    /// operation (see crate docs for `term`).
    PauseOutput,
    /// Restore the backend saved by `PauseOutput` and force a full redraw.
    ResumeOutput,
}

impl Action {
    pub fn write_chunk(bytes: &[u8], color: ColorCode) -> Self {
        let mut data = [0u8; WRITE_CHUNK_CAP];
        let len = bytes.len().min(WRITE_CHUNK_CAP);
        data[..len].copy_from_slice(&bytes[..len]);
        Action::Write {
            data,
            len: len as u8,
            color,
        }
    }
}

struct Slot {
    ready: AtomicBool,
    action: UnsafeCell<MaybeUninit<Action>>,
}

impl Slot {
    fn empty() -> Self {
        Self {
            ready: AtomicBool::new(false),
            action: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }
}

// SAFETY: access to `action` is guarded by `ready`, which is only ever
// flipped true after a complete write (Release) and observed before a read
// (Acquire), and only ever flipped false after the read completes.
unsafe impl Sync for Slot {}

pub struct ActionQueue {
    slots: [Slot; CAPACITY],
    head: AtomicUsize,
    tail: AtomicUsize,
    len: AtomicUsize,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::empty()),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            len: AtomicUsize::new(0),
        }
    }

    /// Enqueue `action`. Returns `Ok(true)` if the ring was empty before
    /// this insertion (the caller must now drain), `Ok(false)` if another
    /// drainer is already in progress, or `Err` if the ring is full (a bug:
    /// see module docs on `CAPACITY`).
    pub fn enqueue(&self, action: Action) -> Result<bool, KernelError> {
        let len_before = self.len.fetch_add(1, Ordering::AcqRel);
        if len_before >= CAPACITY {
            self.len.fetch_sub(1, Ordering::AcqRel);
            return Err(KernelError::ResourceExhausted {
                resource: "terminal action queue",
            });
        }
        let idx = self.tail.fetch_add(1, Ordering::AcqRel) % CAPACITY;
        let slot = &self.slots[idx];
        // SAFETY: this index was reserved exclusively by the fetch_add
        // above; the previous occupant (if any) was fully drained before
        // the tail could wrap back around CAPACITY slots to reach it.
        unsafe { (*slot.action.get()).write(action) };
        slot.ready.store(true, Ordering::Release);
        Ok(len_before == 0)
    }

    /// Pop the next ready action, or `None` if the ring is empty. Must only
    /// be called by the single current drainer.
    pub fn dequeue(&self) -> Option<Action> {
        if self.len.load(Ordering::Acquire) == 0 {
            return None;
        }
        let idx = self.head.fetch_add(1, Ordering::AcqRel) % CAPACITY;
        let slot = &self.slots[idx];
        while !slot.ready.load(Ordering::Acquire) {
            core::hint::spin_loop();
        }
        // SAFETY: `ready` observed true means the producer's write
        // happened-before this read (Release/Acquire pair on the same
        // slot).
        let action = unsafe { (*slot.action.get()).assume_init_read() };
        slot.ready.store(false, Ordering::Release);
        self.len.fetch_sub(1, Ordering::AcqRel);
        Some(action)
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_enqueue_reports_drainer() {
        let q = ActionQueue::new();
        assert_eq!(q.enqueue(Action::PauseOutput), Ok(true));
        assert_eq!(q.enqueue(Action::ResumeOutput), Ok(false));
    }

    #[test]
    fn dequeues_in_fifo_order() {
        let q = ActionQueue::new();
        q.enqueue(Action::MoveCursor { row: 1, col: 2 }).unwrap();
        q.enqueue(Action::MoveCursor { row: 3, col: 4 }).unwrap();
        match q.dequeue().unwrap() {
            Action::MoveCursor { row, col } => assert_eq!((row, col), (1, 2)),
            _ => panic!("wrong variant"),
        }
        match q.dequeue().unwrap() {
            Action::MoveCursor { row, col } => assert_eq!((row, col), (3, 4)),
            _ => panic!("wrong variant"),
        }
        assert!(q.dequeue().is_none());
    }

    #[test]
    fn reports_capacity_exhaustion() {
        let q = ActionQueue::new();
        for _ in 0..CAPACITY {
            q.enqueue(Action::ResumeOutput).unwrap();
        }
        assert_eq!(
            q.enqueue(Action::ResumeOutput),
            Err(KernelError::ResourceExhausted {
                resource: "terminal action queue"
            })
        );
    }

    #[test]
    fn write_chunk_truncates_to_capacity() {
        let long = [b'x'; WRITE_CHUNK_CAP + 10];
        let action = Action::write_chunk(&long, ColorCode::default());
        match action {
            Action::Write { len, .. } => assert_eq!(len as usize, WRITE_CHUNK_CAP),
            _ => panic!("wrong variant"),
        }
    }
}
