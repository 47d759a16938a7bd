//! Terminal initialization configuration, passed once to `term::init`
//! instead of hard-coded constants, following the pattern of this kernel's
//! other subsystems that take a small config struct at construction.

use super::color::ColorCode;

#[derive(Debug, Clone, Copy)]
pub struct TerminalConfig {
    pub rows: usize,
    pub cols: usize,
    pub default_color: ColorCode,
    pub tab_size: usize,
    /// Mirror every raw input byte (pre-filter) to the serial port.
    pub use_serial: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 80,
            default_color: ColorCode::default(),
            tab_size: 8,
            use_serial: true,
        }
    }
}
