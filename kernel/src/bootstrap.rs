//! Early boot sequence: heap bring-up followed by terminal init. Trimmed
//! down from a full kernel's bootstrap (no scheduler, no paging, no device
//! enumeration) since this crate's only subsystem is the text terminal.

use crate::term::TerminalConfig;

/// Run the boot sequence. Must be called once, early, with interrupts
/// disabled.
///
/// # Safety
/// Must run before any other kernel code touches the heap allocator or the
/// terminal, and must not be called more than once.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub unsafe fn boot() {
    crate::logger::init();

    // SAFETY: first thing to run, interrupts are disabled by the caller.
    unsafe { crate::mm::heap::init() };

    let config = TerminalConfig::default();
    // SAFETY: called exactly once, here, before anything else touches the
    // terminal.
    unsafe { crate::drivers::init_vga_terminal(config) };

    crate::println!("kterm: boot complete");
}
