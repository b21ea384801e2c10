//! Viewport arithmetic
//!
//! Screen layout, top to bottom: one tab bar row, `height - 2` text rows,
//! one status row. Each text row starts with a gutter of
//! `gutter_width + 5` columns.

use crate::document::Position;

/// Rows taken by the tab bar and the status line
pub const CHROME_ROWS: usize = 2;

/// Columns taken by the gutter besides the line number, plus the
/// end-of-line cell
pub const GUTTER_PAD: usize = 6;

/// Number of decimal digits in `line_count`, at least 1
pub fn gutter_width(line_count: usize) -> usize {
    let mut digits = 0;
    let mut n = line_count;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits.max(1)
}

/// Number of text rows for a screen `height` rows tall
pub fn text_rows(height: usize) -> usize {
    height.saturating_sub(CHROME_ROWS)
}

/// Maximum number of bytes of a line drawn on a screen `width` wide
pub fn text_cols(width: usize, gutter: usize) -> usize {
    width.saturating_sub(gutter + GUTTER_PAD)
}

/// Adjust `off_row` so that `cursor_row` is on screen
///
/// The result satisfies `cursor_row - (height - 3) <= off_row <= cursor_row`.
pub fn clamp_offset(off_row: usize, cursor_row: usize, height: usize) -> usize {
    let off_row = off_row.min(cursor_row);
    off_row.max(cursor_row.saturating_sub(height.saturating_sub(CHROME_ROWS + 1)))
}

/// Whether the cell at line `row`, column `col` is drawn highlighted
///
/// `start` and `end` are the selection endpoints in document order. Cells
/// from `start` up to, but not including, `end` are highlighted. The same
/// rule is used for the end-of-line cell, with `col` equal to the line
/// length.
pub fn is_highlighted(row: usize, col: usize, start: Position, end: Position) -> bool {
    let before = row < start.row || (row == start.row && col < start.col);
    let after = row > end.row || (row == end.row && col >= end.col);
    !(before || after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 1);
        assert_eq!(gutter_width(1), 1);
        assert_eq!(gutter_width(9), 1);
        assert_eq!(gutter_width(10), 2);
        assert_eq!(gutter_width(12345), 5);
    }

    #[test]
    fn test_text_area() {
        assert_eq!(text_rows(25), 23);
        assert_eq!(text_rows(1), 0);
        assert_eq!(text_cols(80, 2), 72);
        assert_eq!(text_cols(5, 2), 0);
    }

    #[test]
    fn test_clamp_offset_scrolls_up_to_cursor() {
        assert_eq!(clamp_offset(10, 4, 25), 4);
    }

    #[test]
    fn test_clamp_offset_scrolls_down_to_cursor() {
        // 23 text rows: cursor on row 30 needs the view to start at 8
        assert_eq!(clamp_offset(0, 30, 25), 8);
        assert_eq!(clamp_offset(8, 30, 25), 8);
        assert_eq!(clamp_offset(9, 30, 25), 9);
    }

    #[test]
    fn test_degenerate_selection_highlights_nothing() {
        let pos = Position::new(0, 2);
        for col in 0..5 {
            assert!(!is_highlighted(0, col, pos, pos));
        }
    }

    #[test]
    fn test_single_line_selection() {
        let start = Position::new(0, 1);
        let end = Position::new(0, 2);
        assert!(!is_highlighted(0, 0, start, end));
        assert!(is_highlighted(0, 1, start, end));
        assert!(!is_highlighted(0, 2, start, end));
    }

    #[test]
    fn test_multi_line_selection() {
        let start = Position::new(1, 3);
        let end = Position::new(3, 1);

        assert!(!is_highlighted(0, 5, start, end));
        assert!(!is_highlighted(1, 2, start, end));
        assert!(is_highlighted(1, 3, start, end));
        // End-of-line cell of the first line
        assert!(is_highlighted(1, 10, start, end));
        assert!(is_highlighted(2, 0, start, end));
        assert!(is_highlighted(3, 0, start, end));
        assert!(!is_highlighted(3, 1, start, end));
        assert!(!is_highlighted(4, 0, start, end));
    }

    proptest! {
        #[test]
        fn clamp_offset_keeps_cursor_visible(
            off_row in 0usize..10_000,
            cursor_row in 0usize..10_000,
            height in 3usize..200,
        ) {
            let off = clamp_offset(off_row, cursor_row, height);
            prop_assert!(off <= cursor_row);
            prop_assert!(cursor_row - off <= height - 3);
        }
    }
}
