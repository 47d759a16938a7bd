//! Backend wiring: picks a concrete [`crate::term::VideoBackend`] for the
//! running platform and hands it to `term::init`.

use alloc::boxed::Box;

use crate::term::{self, backend::VideoBackend, fb_backend::FramebufferBackend, vga_backend::VgaBackend, TerminalConfig};

/// Bring up the text terminal against the standard 80x25 VGA text buffer.
///
/// # Safety
/// Must be called at most once, with interrupts disabled, matching
/// `term::init`'s own precondition.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub unsafe fn init_vga_terminal(config: TerminalConfig) {
    // SAFETY: called at most once per the caller's contract; no other code
    // constructs a `VgaBackend` concurrently.
    let backend = unsafe { VgaBackend::new(config.rows, config.cols) };
    term::init(Box::new(backend) as Box<dyn VideoBackend>, config);
}

/// Bring up the text terminal against a linear pixel framebuffer.
///
/// # Safety
/// `fb_ptr` must point to a writable framebuffer at least
/// `stride * config.rows * font8x8::FONT_HEIGHT` bytes long, and this must
/// be called at most once with interrupts disabled.
pub unsafe fn init_framebuffer_terminal(
    fb_ptr: *mut u8,
    stride: usize,
    bpp: usize,
    config: TerminalConfig,
) {
    // SAFETY: forwarded to the caller's safety contract.
    let backend = unsafe { FramebufferBackend::new(fb_ptr, stride, bpp, config.cols) };
    term::init(Box::new(backend) as Box<dyn VideoBackend>, config);
}
