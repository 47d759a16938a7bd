//! Serial port output (COM1), used for early boot diagnostics and as the
//! terminal's secondary mirrored byte sink.

use core::fmt;

use lazy_static::lazy_static;
use spin::Mutex;

lazy_static! {
    pub static ref SERIAL1: Mutex<uart_16550::SerialPort> = {
        // SAFETY: 0x3F8 is the well-known I/O base address of COM1. This is
        // only ever accessed through the enclosing Mutex.
        let mut serial_port = unsafe { uart_16550::SerialPort::new(0x3F8) };
        serial_port.init();
        Mutex::new(serial_port)
    };
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;

    crate::arch::without_interrupts(|| {
        SERIAL1
            .lock()
            .write_fmt(args)
            .expect("serial write_fmt failed");
    });
}

/// Write a single raw byte directly to the serial port, bypassing the
/// `fmt::Write` path. Used by the terminal to mirror writer bytes 1:1.
pub fn write_byte(byte: u8) {
    crate::arch::without_interrupts(|| {
        SERIAL1.lock().send(byte);
    });
}

/// Write a raw byte slice directly to the serial port, one byte at a time.
pub fn write_byte_str(bytes: &[u8]) {
    for &b in bytes {
        write_byte(b);
    }
}

/// Prints to the host through the serial interface, appending a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the host through the serial interface, appending a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($fmt:expr) => ($crate::serial_print!(concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => (
        $crate::serial_print!(concat!($fmt, "\n"), $($arg)*)
    );
}
