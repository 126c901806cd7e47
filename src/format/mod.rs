//! Format module: textual presentation of offsets and byte values.
//!
//! The engine hands out raw bytes; everything about how they look on screen
//! lives here. Two knobs are user-adjustable at runtime:
//! - [`DisplayBase`]: hexadecimal or binary digits
//! - [`WordSize`]: how many bits one display group covers (4/8/16/32)
//!
//! Absent bytes (a file shorter than the comparison extent) render as dashes
//! so a missing value can never be mistaken for `0x00`.

use std::fmt::Write;

/// Numeric base used to render byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayBase {
    /// Two hex digits per byte.
    #[default]
    Hex,
    /// Eight binary digits per byte.
    Binary,
}

impl DisplayBase {
    /// The next base in the toggle cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Hex => Self::Binary,
            Self::Binary => Self::Hex,
        }
    }

    /// Short label for the settings panel.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Binary => "bin",
        }
    }
}

/// Number of bits one display group covers.
///
/// The viewport advances one group per display line: `Word` shows two
/// consecutive bytes per line, `DWord` four. `Nibble` still covers one byte
/// but renders its two hex digits spaced apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSize {
    /// 4-bit groups: one byte per line, nibbles spaced.
    Nibble,
    /// 8-bit groups: one byte per line.
    #[default]
    Byte,
    /// 16-bit groups: two bytes per line.
    Word,
    /// 32-bit groups: four bytes per line.
    DWord,
}

impl WordSize {
    /// Bits covered by one group.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Nibble => 4,
            Self::Byte => 8,
            Self::Word => 16,
            Self::DWord => 32,
        }
    }

    /// Bytes consumed per display line.
    pub const fn group_bytes(self) -> usize {
        match self {
            Self::Nibble | Self::Byte => 1,
            Self::Word => 2,
            Self::DWord => 4,
        }
    }

    /// The next size in the toggle cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Nibble => Self::Byte,
            Self::Byte => Self::Word,
            Self::Word => Self::DWord,
            Self::DWord => Self::Nibble,
        }
    }

    /// Short label for the settings panel.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nibble => "4",
            Self::Byte => "8",
            Self::Word => "16",
            Self::DWord => "32",
        }
    }
}

/// Number of hex digits needed to address every offset in the extent.
///
/// Never narrower than four digits, so small files still get the classic
/// `0x0000` gutter.
pub fn address_width(total_length: u64) -> usize {
    let top = total_length.saturating_sub(1);
    let digits = if top == 0 {
        1
    } else {
        let bits = 64 - top.leading_zeros() as usize;
        (bits + 3) / 4
    };
    digits.max(4)
}

/// Render an offset as a fixed-width hexadecimal address, `0x0041` style.
pub fn format_offset(offset: u64, width: usize) -> String {
    format!("0x{offset:0width$x}")
}

/// Render one file's bytes across a display group.
///
/// `values` holds up to [`WordSize::group_bytes`] entries (the final line of
/// a file may cover fewer offsets than a full group). Absent bytes render as
/// dashes of the same width as a present byte, keeping columns aligned.
pub fn format_group(values: &[Option<u8>], base: DisplayBase, word: WordSize) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        match (word, value) {
            (WordSize::Nibble, Some(byte)) => {
                let _ = write!(out, "{:x} {:x}", byte >> 4, byte & 0x0f);
            }
            (WordSize::Nibble, None) => out.push_str("- -"),
            (_, Some(byte)) => match base {
                DisplayBase::Hex => {
                    let _ = write!(out, "{byte:02x}");
                }
                DisplayBase::Binary => {
                    let _ = write!(out, "{byte:08b}");
                }
            },
            (_, None) => match base {
                DisplayBase::Hex => out.push_str("--"),
                DisplayBase::Binary => out.push_str("--------"),
            },
        }
        // Space between the bytes of a multi-byte group in binary, where a
        // run of 32 digits is unreadable otherwise.
        if base == DisplayBase::Binary && i + 1 < values.len() {
            out.push(' ');
        }
    }
    out
}

/// Width in columns of one fully-populated group, for layout.
pub fn group_width(base: DisplayBase, word: WordSize) -> usize {
    let bytes = word.group_bytes();
    match (word, base) {
        (WordSize::Nibble, _) => 3,
        (_, DisplayBase::Hex) => bytes * 2,
        (_, DisplayBase::Binary) => bytes * 8 + (bytes - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_width() {
        assert_eq!(address_width(0), 4);
        assert_eq!(address_width(16), 4);
        assert_eq!(address_width(0x1_0000), 4);
        assert_eq!(address_width(0x1_0001), 5);
        assert_eq!(address_width(u64::MAX), 16);
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0x41, 4), "0x0041");
        assert_eq!(format_offset(0, 4), "0x0000");
        assert_eq!(format_offset(0xabcd_ef, 6), "0xabcdef");
    }

    #[test]
    fn test_hex_byte() {
        let s = format_group(&[Some(0xa1)], DisplayBase::Hex, WordSize::Byte);
        assert_eq!(s, "a1");
    }

    #[test]
    fn test_binary_byte() {
        let s = format_group(&[Some(0b1010_0001)], DisplayBase::Binary, WordSize::Byte);
        assert_eq!(s, "10100001");
    }

    #[test]
    fn test_nibble_split() {
        let s = format_group(&[Some(0xa1)], DisplayBase::Hex, WordSize::Nibble);
        assert_eq!(s, "a 1");
    }

    #[test]
    fn test_word_concatenates_bytes() {
        let s = format_group(&[Some(0x12), Some(0x34)], DisplayBase::Hex, WordSize::Word);
        assert_eq!(s, "1234");

        let s = format_group(
            &[Some(0xde), Some(0xad), Some(0xbe), Some(0xef)],
            DisplayBase::Hex,
            WordSize::DWord,
        );
        assert_eq!(s, "deadbeef");
    }

    #[test]
    fn test_absent_renders_as_dashes() {
        assert_eq!(
            format_group(&[None], DisplayBase::Hex, WordSize::Byte),
            "--"
        );
        assert_eq!(
            format_group(&[None], DisplayBase::Binary, WordSize::Byte),
            "--------"
        );
        assert_eq!(
            format_group(&[Some(0x01), None], DisplayBase::Hex, WordSize::Word),
            "01--"
        );
    }

    #[test]
    fn test_group_width_matches_rendered_width() {
        for base in [DisplayBase::Hex, DisplayBase::Binary] {
            for word in [
                WordSize::Nibble,
                WordSize::Byte,
                WordSize::Word,
                WordSize::DWord,
            ] {
                let values = vec![Some(0u8); word.group_bytes()];
                let rendered = format_group(&values, base, word);
                assert_eq!(
                    rendered.len(),
                    group_width(base, word),
                    "{base:?} {word:?}"
                );
            }
        }
    }

    #[test]
    fn test_toggle_cycles() {
        assert_eq!(DisplayBase::Hex.next(), DisplayBase::Binary);
        assert_eq!(DisplayBase::Binary.next(), DisplayBase::Hex);

        let mut word = WordSize::Nibble;
        for _ in 0..4 {
            word = word.next();
        }
        assert_eq!(word, WordSize::Nibble);
    }
}
