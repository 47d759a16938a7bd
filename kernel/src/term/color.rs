//! Packed terminal color: a foreground nibble and a background nibble,
//! matching the VGA text-mode attribute byte bit-for-bit so the VGA backend
//! needs no translation.

/// The sixteen VGA text-mode colors, usable as either foreground or
/// background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// A packed foreground/background color byte: low nibble foreground, high
/// nibble background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(pub u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self(((background as u8) << 4) | (foreground as u8))
    }

    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn as_byte(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn background(self) -> u8 {
        (self.0 >> 4) & 0x0F
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_fg_low_bg_high() {
        let c = ColorCode::new(Color::Red, Color::Blue);
        assert_eq!(c.foreground(), Color::Red as u8);
        assert_eq!(c.background(), Color::Blue as u8);
        assert_eq!(c.as_byte(), 0x14);
    }
}
