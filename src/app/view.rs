//! Frame rendering: comparison rows and chrome into a [`FrameBuffer`].
//!
//! Layout, left to right: a fixed-width address gutter, one value column per
//! file, and (when open) the settings panel docked on the right. The bottom
//! row is a key-hint footer. Addresses of divergent lines render red; that
//! is the entire highlight scheme.

use super::output::{FrameBuffer, Style};
use crate::engine::Row;
use crate::format::{self, DisplayBase, WordSize};

/// Columns the settings panel occupies when open, border included.
pub const PANEL_WIDTH: u16 = 26;

/// Everything the frame renderer needs besides the rows themselves.
#[derive(Debug)]
pub struct FrameContext<'a> {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Hex digits per address, fixed per session.
    pub address_width: usize,
    /// Active numeric base.
    pub base: DisplayBase,
    /// Active word size.
    pub word: WordSize,
    /// Whether the settings panel is expanded.
    pub panel_open: bool,
    /// Display names of the compared files, in column order.
    pub file_names: &'a [String],
}

impl FrameContext<'_> {
    /// Display lines available for comparison content (footer excluded).
    pub fn content_lines(&self) -> usize {
        usize::from(self.height.saturating_sub(1))
    }

    /// Bytes of the comparison extent covered by one full screen.
    pub fn bytes_per_page(&self) -> u64 {
        self.content_lines() as u64 * self.word.group_bytes() as u64
    }

    /// Whether the panel actually fits; narrow terminals force it closed.
    fn panel_visible(&self) -> bool {
        self.panel_open && self.width > PANEL_WIDTH + 8
    }
}

/// Render a complete frame.
///
/// `rows` is the output of [`materialize`](crate::materialize) for the
/// current scroll position, `content_lines * group_bytes` rows at most; a
/// short final page simply leaves the remaining lines blank.
pub fn draw_frame(out: &mut FrameBuffer, rows: &[Row], ctx: &FrameContext) {
    out.clear();
    out.cursor_hide();
    out.reset_attrs();
    out.clear_screen();

    let group = ctx.word.group_bytes();
    for line in 0..ctx.content_lines() {
        let start = line * group;
        if start >= rows.len() {
            break;
        }
        let end = (start + group).min(rows.len());
        draw_line(out, &rows[start..end], line as u16, ctx);
    }

    if ctx.panel_visible() {
        draw_panel(out, ctx);
    }
    draw_footer(out, ctx);

    out.reset_attrs();
}

/// Render one display line: an address and one value group per file.
fn draw_line(out: &mut FrameBuffer, chunk: &[Row], line: u16, ctx: &FrameContext) {
    let divergent = chunk.iter().any(|row| !row.all_equal);

    out.cursor_move(0, line);
    out.set_style(if divergent {
        Style::Divergent
    } else {
        Style::Plain
    });
    out.write_str(&format::format_offset(chunk[0].offset, ctx.address_width));
    out.set_style(Style::Plain);

    let file_count = chunk[0].values.len();
    for file_index in 0..file_count {
        let values: Vec<Option<u8>> = chunk
            .iter()
            .map(|row| row.values.get(file_index).copied().flatten())
            .collect();
        out.write_str(" ");
        out.write_str(&format::format_group(&values, ctx.base, ctx.word));
    }
}

/// Render the settings panel docked to the right edge.
fn draw_panel(out: &mut FrameBuffer, ctx: &FrameContext) {
    let x = ctx.width - PANEL_WIDTH;
    let inner = x + 2;
    let name_width = usize::from(PANEL_WIDTH.saturating_sub(3));

    out.set_style(Style::Dim);
    for y in 0..ctx.height.saturating_sub(1) {
        out.cursor_move(x, y);
        out.write_str("\u{2502}");
    }

    out.cursor_move(inner, 1);
    out.set_style(Style::Heading);
    out.write_str("Settings");
    out.set_style(Style::Plain);

    out.cursor_move(inner, 2);
    out.write_str(&format!("size: {}", ctx.word.label()));
    out.cursor_move(inner, 3);
    out.write_str(&format!("base: {}", ctx.base.label()));

    out.cursor_move(inner, 5);
    out.set_style(Style::Heading);
    out.write_str("Files");
    out.set_style(Style::Plain);

    for (i, name) in ctx.file_names.iter().enumerate() {
        let y = 6 + i as u16;
        if y >= ctx.height.saturating_sub(1) {
            break;
        }
        out.cursor_move(inner, y);
        let display: String = name.chars().take(name_width).collect();
        out.write_str(&display);
    }
}

/// Render the key-hint footer on the bottom row.
fn draw_footer(out: &mut FrameBuffer, ctx: &FrameContext) {
    out.cursor_move(0, ctx.height.saturating_sub(1));
    out.set_style(Style::Dim);
    out.clear_to_eol();
    let hints = format!(
        " q quit  \u{2191}/\u{2193} scroll  b base [{}]  w word [{}]  tab panel",
        ctx.base.label(),
        ctx.word.label()
    );
    let display: String = hints.chars().take(usize::from(ctx.width)).collect();
    out.write_str(&display);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(file_names: &[String]) -> FrameContext<'_> {
        FrameContext {
            width: 80,
            height: 24,
            address_width: 4,
            base: DisplayBase::Hex,
            word: WordSize::Byte,
            panel_open: false,
            file_names,
        }
    }

    fn frame_text(rows: &[Row], ctx: &FrameContext) -> String {
        let mut out = FrameBuffer::new();
        draw_frame(&mut out, rows, ctx);
        String::from_utf8_lossy(out.as_bytes()).into_owned()
    }

    #[test]
    fn test_frame_contains_addresses_and_values() {
        let names = vec!["a.bin".to_string(), "b.bin".to_string()];
        let rows = vec![
            Row::new(0, vec![Some(0x41), Some(0x41)]),
            Row::new(1, vec![Some(0x42), Some(0x42)]),
        ];

        let text = frame_text(&rows, &ctx(&names));
        assert!(text.contains("0x0000 41 41"));
        assert!(text.contains("0x0001 42 42"));
    }

    #[test]
    fn test_divergent_line_is_styled_red() {
        let names = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            Row::new(0, vec![Some(1), Some(1)]),
            Row::new(1, vec![Some(1), Some(2)]),
        ];

        let text = frame_text(&rows, &ctx(&names));
        // Only the divergent address is preceded by the red SGR.
        assert!(text.contains("\x1b[0;31m"));
        let red_then_addr = text.find("\x1b[0;31m").map(|i| &text[i..]);
        assert!(red_then_addr.unwrap().contains("0x0001"));
    }

    #[test]
    fn test_absent_bytes_render_as_dashes() {
        let names = vec!["a".to_string(), "b".to_string()];
        let rows = vec![Row::new(3, vec![Some(0x04), None])];

        // The address is styled divergent (an SGR sits between it and the
        // values), so assert the two pieces separately.
        let text = frame_text(&rows, &ctx(&names));
        assert!(text.contains("0x0003"));
        assert!(text.contains(" 04 --"));
    }

    #[test]
    fn test_panel_shows_settings_and_files() {
        let names = vec!["first.bin".to_string(), "second.bin".to_string()];
        let mut context = ctx(&names);
        context.panel_open = true;

        let text = frame_text(&[], &context);
        assert!(text.contains("Settings"));
        assert!(text.contains("size: 8"));
        assert!(text.contains("base: hex"));
        assert!(text.contains("first.bin"));
        assert!(text.contains("second.bin"));
    }

    #[test]
    fn test_panel_forced_closed_on_narrow_terminal() {
        let names = vec!["a".to_string()];
        let mut context = ctx(&names);
        context.panel_open = true;
        context.width = 20;

        let text = frame_text(&[], &context);
        assert!(!text.contains("Settings"));
    }

    #[test]
    fn test_footer_reflects_active_configuration() {
        let names = vec!["a".to_string()];
        let mut context = ctx(&names);
        context.base = DisplayBase::Binary;
        context.word = WordSize::Word;

        let text = frame_text(&[], &context);
        assert!(text.contains("b base [bin]"));
        assert!(text.contains("w word [16]"));
    }

    #[test]
    fn test_word_grouping_packs_two_offsets_per_line() {
        let names = vec!["a".to_string()];
        let mut context = ctx(&names);
        context.word = WordSize::Word;

        let rows = vec![
            Row::new(0, vec![Some(0x12)]),
            Row::new(1, vec![Some(0x34)]),
            Row::new(2, vec![Some(0x56)]),
            Row::new(3, vec![Some(0x78)]),
        ];
        let text = frame_text(&rows, &context);
        assert!(text.contains("0x0000 1234"));
        assert!(text.contains("0x0002 5678"));
    }

    #[test]
    fn test_bytes_per_page_scales_with_word_size() {
        let names = vec!["a".to_string()];
        let mut context = ctx(&names);
        assert_eq!(context.bytes_per_page(), 23);
        context.word = WordSize::DWord;
        assert_eq!(context.bytes_per_page(), 92);
    }
}
