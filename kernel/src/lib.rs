//! kterm kernel library.
//!
//! A minimal bare-metal kernel crate built around one centerpiece subsystem:
//! the text terminal in [`term`]. Everything else here (heap, serial, printk,
//! panic-state tracking, architecture glue) exists to give that subsystem the
//! collaborators its init path expects.

#![no_std]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Host target (the one `cargo test` actually runs on): delegate to the
// system allocator so ordinary `#[test]` functions can use `Vec`/`String`/
// `Box` without any bare-metal heap bring-up.
#[cfg(not(target_os = "none"))]
extern crate std;
#[cfg(not(target_os = "none"))]
#[global_allocator]
static SYSTEM_ALLOCATOR: std::alloc::System = std::alloc::System;

pub mod arch;
pub mod bootstrap;
pub mod drivers;
pub mod error;
pub mod logger;
pub mod mm;
pub mod panic;
#[macro_use]
pub mod printk;
pub mod serial;
pub mod sync;
pub mod term;

#[cfg(target_os = "none")]
#[panic_handler]
fn panic_handler(info: &core::panic::PanicInfo) -> ! {
    panic::enter_panic();
    serial_println!("kernel panic: {}", info);
    loop {
        core::hint::spin_loop();
    }
}
