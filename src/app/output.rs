//! `FrameBuffer`: single-syscall output buffer for ANSI sequences.

use std::io::Write;

/// Text styles the viewer uses, mapped to SGR sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Default terminal attributes.
    Plain,
    /// Red: the files diverge at this offset.
    Divergent,
    /// Dim: chrome such as panel borders and key hints.
    Dim,
    /// Bold: panel headings.
    Heading,
}

impl Style {
    const fn sgr(self) -> &'static [u8] {
        match self {
            Self::Plain => b"\x1b[0m",
            Self::Divergent => b"\x1b[0;31m",
            Self::Dim => b"\x1b[0;2m",
            Self::Heading => b"\x1b[0;1m",
        }
    }
}

/// Pre-allocated buffer for building one frame of ANSI output.
///
/// Everything for a frame is accumulated here, then flushed in a single
/// `write()` syscall so the terminal never shows a half-drawn frame.
pub struct FrameBuffer {
    data: Vec<u8>,
    /// Last emitted style, to skip redundant SGR sequences.
    style: Option<Style>,
}

impl FrameBuffer {
    /// Create a new frame buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            style: None,
        }
    }

    /// Create a buffer sized for a typical terminal frame (16 KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.style = None;
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y), 0-indexed.
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Clear from the cursor to the end of the line.
    #[inline]
    pub fn clear_to_eol(&mut self) {
        self.data.extend_from_slice(b"\x1b[K");
    }

    /// Switch to a style, skipping the sequence if it is already active.
    pub fn set_style(&mut self, style: Style) {
        if self.style != Some(style) {
            self.data.extend_from_slice(style.sgr());
            self.style = Some(style);
        }
    }

    /// Reset all attributes.
    pub fn reset_attrs(&mut self) {
        self.set_style(Style::Plain);
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut out = FrameBuffer::new();
        out.cursor_move(0, 0);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H");

        out.clear();
        out.cursor_move(10, 5);
        assert_eq!(out.as_bytes(), b"\x1b[6;11H");
    }

    #[test]
    fn test_redundant_styles_are_skipped() {
        let mut out = FrameBuffer::new();
        out.set_style(Style::Divergent);
        let after_first = out.len();
        out.set_style(Style::Divergent);
        assert_eq!(out.len(), after_first);

        out.set_style(Style::Plain);
        assert!(out.len() > after_first);
    }

    #[test]
    fn test_clear_resets_style_tracking() {
        let mut out = FrameBuffer::new();
        out.set_style(Style::Dim);
        out.clear();
        assert!(out.is_empty());

        // After a clear the terminal state is unknown again.
        out.set_style(Style::Dim);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_flush_writes_everything() {
        let mut out = FrameBuffer::new();
        out.write_str("hello");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hello");
    }
}
