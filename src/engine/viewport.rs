//! Viewport materialization: scroll position to visible comparison rows.

use super::Row;
use crate::error::Result;
use crate::source::FileSet;
use log::warn;

/// Materialize the rows visible at a scroll position.
///
/// Row `i` covers `offset = scroll_offset + i`. Materialization stops at the
/// comparison extent, so the final page may be short: the returned sequence
/// has `height` rows when the window fits entirely inside the extent, fewer
/// on partial overlap, and none once `scroll_offset` is past the end.
///
/// Files shorter than the extent do not abort a row: their missing bytes
/// become absent markers (`None`) and the row reports `all_equal = false`.
///
/// The call is idempotent and leaves no state behind; repeated calls with
/// the same arguments against an unmodified set return identical rows.
///
/// # Errors
///
/// Unexpected I/O faults propagate as [`Error::Io`](crate::Error::Io).
/// End-of-file conditions
/// never do: inside the extent they fold into absent markers, past the
/// extent they simply end the row sequence.
pub fn materialize(file_set: &mut FileSet, scroll_offset: u64, height: usize) -> Result<Vec<Row>> {
    let total = file_set.total_length();
    let file_count = file_set.file_count();

    let mut rows = Vec::with_capacity(height);
    for i in 0..height as u64 {
        let Some(offset) = scroll_offset.checked_add(i) else {
            break;
        };
        if offset >= total {
            break;
        }

        let mut values = Vec::with_capacity(file_count);
        for file_index in 0..file_count {
            match file_set.read_byte(file_index, offset) {
                Ok(byte) => values.push(Some(byte)),
                Err(err) if err.is_short_read() => {
                    // The extent comes from the first file; other files may
                    // legitimately end before it.
                    values.push(None);
                }
                Err(err) => {
                    warn!("read fault in file #{file_index} at {offset:#x}: {err}");
                    return Err(err);
                }
            }
        }

        rows.push(Row::new(offset, values));
    }

    Ok(rows)
}

/// Largest scroll offset that still shows a full page, used by callers to
/// clamp scrolling.
pub fn max_scroll_offset(total_length: u64, height: usize) -> u64 {
    total_length.saturating_sub(height as u64)
}
