//! Cursor position helpers
//!
//! All offsets here count characters (Unicode scalar values), which is what
//! the egui text cursor reports. Byte offsets never leave this module.

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `char_idx`, or `text.len()` past the end
pub fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Character offset of a `(row, col)` location
///
/// Columns past the end of a line snap to the line end. Rows past the last
/// line snap to the end of the text.
pub fn offset_of(text: &str, row: usize, col: usize) -> usize {
    let mut offset = 0;
    for (idx, line) in text.split('\n').enumerate() {
        let len = char_len(line);
        if idx == row {
            return offset + col.min(len);
        }
        offset += len + 1;
    }
    char_len(text)
}

/// `(row, col)` location of a character offset
pub fn location_of(text: &str, offset: usize) -> (usize, usize) {
    let mut line_start = 0;
    let mut last = (0, 0);
    for (row, line) in text.split('\n').enumerate() {
        let len = char_len(line);
        if line_start + len >= offset {
            return (row, offset - line_start);
        }
        last = (row, len);
        line_start += len + 1;
    }
    last
}

/// Index of the line holding `offset` and the character offset where it starts
pub(crate) fn line_at(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut line_start = 0;
    for (idx, line) in lines.iter().enumerate() {
        let len = char_len(line);
        if line_start + len >= offset {
            return (idx, line_start);
        }
        line_start += len + 1;
    }
    (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let text = "# Title\n\nbody text";
        assert_eq!(offset_of(text, 0, 0), 0);
        assert_eq!(offset_of(text, 0, 3), 3);
        assert_eq!(offset_of(text, 1, 0), 8);
        assert_eq!(offset_of(text, 2, 4), 13);
        // column clamps to the line
        assert_eq!(offset_of(text, 0, 99), 7);
        // row past the end clamps to the text
        assert_eq!(offset_of(text, 10, 0), 18);
    }

    #[test]
    fn test_location_of() {
        let text = "# Title\n\nbody text";
        assert_eq!(location_of(text, 0), (0, 0));
        assert_eq!(location_of(text, 7), (0, 7));
        assert_eq!(location_of(text, 8), (1, 0));
        assert_eq!(location_of(text, 13), (2, 4));
        assert_eq!(location_of(text, 500), (2, 9));
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "héllo\nwörld";
        assert_eq!(char_len(text), 11);
        assert_eq!(offset_of(text, 1, 2), 8);
        assert_eq!(location_of(text, 8), (1, 2));
        assert_eq!(byte_index(text, 2), 3);
        assert_eq!(byte_index(text, 100), text.len());
    }

    #[test]
    fn test_line_at() {
        let lines = ["abc", "", "defg"];
        assert_eq!(line_at(&lines, 0), (0, 0));
        assert_eq!(line_at(&lines, 3), (0, 0));
        assert_eq!(line_at(&lines, 4), (1, 4));
        assert_eq!(line_at(&lines, 6), (2, 5));
    }
}
