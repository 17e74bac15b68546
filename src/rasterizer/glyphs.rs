//! Built-in 5x7 bitmap font for the software framebuffer
//!
//! Each glyph is seven rows of five bits, most significant bit on the left.
//! Lowercase letters render with their uppercase glyph.

use super::canvas::{DrawError, FontWeight};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;
/// Horizontal distance between glyph origins, in font pixels
pub const ADVANCE: i32 = 6;
/// Em height in font pixels (glyph plus one row of leading)
pub const EM: i32 = 8;

/// Look up the bitmap for a character
pub fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

/// Pixel scale for a requested text size
///
/// Bold needs at least two screen pixels per font pixel for the
/// double-strike to stay legible.
pub fn scale_for(size: i32, weight: FontWeight) -> Result<i32, DrawError> {
    let scale = size / EM;
    let min = match weight {
        FontWeight::Regular => 1,
        FontWeight::Bold => 2,
    };
    if scale < min {
        return Err(DrawError::TextTooSmall { size, weight });
    }
    Ok(scale)
}

/// Horizontal offset of the second strike for bold text
pub fn bold_offset(scale: i32) -> i32 {
    (scale / 2).max(1)
}

/// Pixel size of `text` at `scale`
pub fn measure(text: &str, scale: i32, weight: FontWeight) -> (i32, i32) {
    let count = text.chars().count() as i32;
    if count == 0 {
        return (0, 0);
    }
    let mut width = ((count - 1) * ADVANCE + GLYPH_WIDTH) * scale;
    if weight == FontWeight::Bold {
        width += bold_offset(scale);
    }
    (width, GLYPH_HEIGHT * scale)
}

/// Resolve every glyph up front so a missing one draws nothing at all
pub fn lookup_all(text: &str) -> Result<Vec<[u8; 7]>, DrawError> {
    text.chars()
        .map(|c| glyph(c).ok_or(DrawError::MissingGlyph(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('p'), glyph('P'));
        assert!(glyph('~').is_none());
    }

    #[test]
    fn test_scale_thresholds() {
        assert_eq!(scale_for(22, FontWeight::Bold), Ok(2));
        assert!(matches!(scale_for(15, FontWeight::Bold), Err(DrawError::TextTooSmall { .. })));
        assert_eq!(scale_for(11, FontWeight::Regular), Ok(1));
        assert!(scale_for(7, FontWeight::Regular).is_err());
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("P", 2, FontWeight::Regular), (10, 14));
        assert_eq!(measure("P", 2, FontWeight::Bold), (11, 14));
        assert_eq!(measure("AB", 1, FontWeight::Regular), (11, 7));
        assert_eq!(measure("", 3, FontWeight::Bold), (0, 0));
    }

    #[test]
    fn test_lookup_all_reports_missing() {
        assert_eq!(lookup_all("a~b"), Err(DrawError::MissingGlyph('~')));
        assert_eq!(lookup_all("(3, 4)").map(|g| g.len()), Ok(6));
    }
}
