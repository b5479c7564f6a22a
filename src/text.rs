// Text fitting: greedy word wrap, the image-height best-fit search, and
// ellipsis truncation for lines that still do not fit.

/// Image heights tried, as a percentage of card height, largest first.
pub const IMAGE_HEIGHT_PERCENTS: [u32; 5] = [55, 45, 35, 25, 15];

/// Greedy word wrap at a fixed character width. Never breaks inside a word;
/// a word longer than the width gets a line of its own.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// How many text lines fit in `space_px` at a fixed line height, never less
/// than one.
pub fn lines_that_fit(space_px: i64, line_height_px: u32) -> usize {
    (space_px / line_height_px as i64).max(1) as usize
}

/// Discrete best-fit search: the largest image-height percentage whose
/// remaining vertical space still holds every wrapped line. `None` when even
/// the smallest image leaves the text overflowing.
pub fn fit_image_height(
    line_count: usize,
    card_h_px: u32,
    title_end_px: u32,
    padding_px: u32,
    line_height_px: u32,
) -> Option<u32> {
    for percent in IMAGE_HEIGHT_PERCENTS {
        let image_h = card_h_px * percent / 100;
        let text_space =
            card_h_px as i64 - title_end_px as i64 - image_h as i64 - 3 * padding_px as i64;
        if line_count <= lines_that_fit(text_space, line_height_px) {
            return Some(percent);
        }
    }
    None
}

/// Keep the first `max_lines` lines, replacing the tail of the last kept line
/// with an ellipsis.
pub fn truncate_lines(lines: &mut Vec<String>, max_lines: usize, max_chars: usize) {
    if lines.len() <= max_lines {
        return;
    }
    lines.truncate(max_lines.max(1));
    if let Some(last) = lines.last_mut() {
        let keep = max_chars.saturating_sub(5);
        let truncated: String = last.chars().take(keep).collect();
        *last = format!("{}...", truncated.trim_end());
    }
}
