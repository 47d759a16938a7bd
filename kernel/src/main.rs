//! Minimal bare-metal entry point demonstrating the text terminal. This
//! crate's substance is the library; this binary only proves it boots.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
use kterm_kernel as _;

#[cfg(target_os = "none")]
#[no_mangle]
pub extern "C" fn _start() -> ! {
    // SAFETY: first and only call, made once at boot with interrupts still
    // disabled by the bootloader.
    unsafe { kterm_kernel::bootstrap::boot() };
    loop {
        core::hint::spin_loop();
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    println!("kterm-kernel is a bare-metal binary; run it under QEMU, not natively.");
}
