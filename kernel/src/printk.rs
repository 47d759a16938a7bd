//! Early-boot print ring buffer.
//!
//! `print!`/`println!` calls made before the terminal subsystem is
//! initialized are buffered here (and mirrored to serial) instead of being
//! dropped. Once `term::init` completes it calls [`flush_into_terminal`],
//! which drains whatever accumulated and writes it through the terminal the
//! same way any other caller would.

use core::fmt::{self, Write};

use spin::Mutex;

use crate::term;

/// Ring buffer capacity for pre-terminal output. Generous enough to hold
/// several screens of early boot diagnostics.
const RING_CAPACITY: usize = 8192;

struct PrintkRing {
    buf: [u8; RING_CAPACITY],
    /// Next write offset. Wraps; once it has wrapped the buffer holds only
    /// the most recent `RING_CAPACITY` bytes (oldest lines are dropped).
    head: usize,
    len: usize,
}

impl PrintkRing {
    const fn new() -> Self {
        Self {
            buf: [0; RING_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.buf[self.head] = b;
            self.head = (self.head + 1) % RING_CAPACITY;
            if self.len < RING_CAPACITY {
                self.len += 1;
            }
        }
    }

    /// Returns the buffered bytes in chronological order.
    fn drain(&mut self) -> alloc::vec::Vec<u8> {
        let mut out = alloc::vec::Vec::with_capacity(self.len);
        let start = if self.len < RING_CAPACITY {
            0
        } else {
            self.head
        };
        for i in 0..self.len {
            out.push(self.buf[(start + i) % RING_CAPACITY]);
        }
        self.len = 0;
        self.head = 0;
        out
    }
}

static RING: Mutex<PrintkRing> = Mutex::new(PrintkRing::new());

struct ByteSink;

impl Write for ByteSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        crate::serial::write_byte_str(s.as_bytes());
        if term::is_initialized() {
            term::write(s.as_bytes());
        } else {
            RING.lock().push_bytes(s.as_bytes());
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn print(args: fmt::Arguments) {
    let _ = ByteSink.write_fmt(args);
}

/// Drain any output buffered before the terminal was ready and replay it
/// through the terminal. Called once, at the end of `term::init`.
pub fn flush_into_terminal() {
    let bytes = RING.lock().drain();
    if !bytes.is_empty() {
        term::write(&bytes);
    }
}

/// Prints to the kernel console: the terminal once initialized, the printk
/// ring buffer (and serial) before that.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::printk::print(format_args!($($arg)*)));
}

/// Like [`print!`] but appends a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
