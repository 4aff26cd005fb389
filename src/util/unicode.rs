use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of one char in terminal cells. Tabs count as 4 cells.
pub fn char_width(c: char) -> usize {
    if c == '\t' {
        4
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…`
/// if truncated. Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    match max_cells {
        0 => String::new(),
        1 => "\u{2026}".to_string(),
        _ => {
            let budget = max_cells - 1;
            let mut used = 0;
            let mut end = 0;
            for (i, g) in s.grapheme_indices(true) {
                let gw = display_width(g);
                if used + gw > budget {
                    break;
                }
                used += gw;
                end = i + g.len();
            }
            format!("{}\u{2026}", &s[..end])
        }
    }
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let rest = &s[byte_offset..];
    let step = rest.graphemes(true).next().map(str::len).unwrap_or(rest.len());
    Some(byte_offset + step)
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
        .or(Some(0))
}
