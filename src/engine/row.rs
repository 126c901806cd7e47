//! Row: the transient view-model for one line of the comparison.

/// One line of the viewport: a byte offset, the value read from each file at
/// that offset, and whether all files agree there.
///
/// `values` follows the file order of the [`FileSet`](crate::FileSet) the
/// row was materialized from. `None` is the *absent marker*: the file is
/// shorter than the comparison extent and has no byte at this offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The byte address this row describes.
    pub offset: u64,
    /// One entry per file; `None` where a file has no byte at `offset`.
    pub values: Vec<Option<u8>>,
    /// True iff every value is present and byte-identical. Absence is never
    /// equal to presence, so any `None` forces `false`.
    pub all_equal: bool,
}

impl Row {
    /// Build a row, computing the equality flag from the values.
    pub fn new(offset: u64, values: Vec<Option<u8>>) -> Self {
        let all_equal = values_equal(&values);
        Self {
            offset,
            values,
            all_equal,
        }
    }
}

/// Equality fold: every value present and identical.
///
/// Exact byte equality — display base never enters into it. A single value
/// is trivially equal (a one-file session marks every row equal).
fn values_equal(values: &[Option<u8>]) -> bool {
    let mut iter = values.iter();
    match iter.next() {
        Some(Some(first)) => iter.all(|value| *value == Some(*first)),
        // A leading absent marker, or no values at all.
        Some(None) | None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values_are_equal() {
        let row = Row::new(0, vec![Some(0x41), Some(0x41), Some(0x41)]);
        assert!(row.all_equal);
    }

    #[test]
    fn test_differing_values_are_unequal() {
        let row = Row::new(2, vec![Some(0x43), Some(0x99)]);
        assert!(!row.all_equal);
    }

    #[test]
    fn test_absent_is_never_equal() {
        let row = Row::new(3, vec![Some(0x00), None]);
        assert!(!row.all_equal);

        // Even two absents do not count as agreement.
        let row = Row::new(3, vec![None, None]);
        assert!(!row.all_equal);
    }

    #[test]
    fn test_single_value_is_trivially_equal() {
        let row = Row::new(7, vec![Some(0xff)]);
        assert!(row.all_equal);
    }

    #[test]
    fn test_zero_bytes_compare_equal_regardless_of_display() {
        // Equality is on raw bytes, not on any formatted representation.
        let row = Row::new(0, vec![Some(0x00), Some(0x00)]);
        assert!(row.all_equal);
    }
}
