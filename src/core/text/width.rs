//! Grapheme width and visible width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 3;

/// Length in bytes of the ANSI escape sequence starting at `pos`, if any.
///
/// Handles CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ST`) sequences.
fn ansi_len(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&0x1b) {
        return None;
    }
    match bytes.get(pos + 1) {
        Some(b'[') => {
            let mut idx = pos + 2;
            while idx < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[idx]) {
                    return Some(idx + 1 - pos);
                }
                idx += 1;
            }
            None
        }
        Some(b']') => {
            let mut idx = pos + 2;
            while idx < bytes.len() {
                if bytes[idx] == 0x07 {
                    return Some(idx + 1 - pos);
                }
                if bytes[idx] == 0x1b && bytes.get(idx + 1) == Some(&b'\\') {
                    return Some(idx + 2 - pos);
                }
                idx += 1;
            }
            None
        }
        _ => None,
    }
}

fn grapheme_width(grapheme: &str) -> usize {
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    UnicodeWidthStr::width(grapheme)
}

/// Split `input` into visible text runs and escape sequences, preserving order.
fn segments(input: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut idx = 0;
    let mut text_start = 0;
    while idx < input.len() {
        if let Some(len) = ansi_len(input, idx) {
            if text_start < idx {
                out.push((false, &input[text_start..idx]));
            }
            out.push((true, &input[idx..idx + len]));
            idx += len;
            text_start = idx;
            continue;
        }
        idx += input[idx..].chars().next().map_or(1, char::len_utf8);
    }
    if text_start < input.len() {
        out.push((false, &input[text_start..]));
    }
    out
}

/// Terminal column width of `input`, ignoring ANSI control sequences.
pub fn visible_width(input: &str) -> usize {
    segments(input)
        .into_iter()
        .filter(|(is_ansi, _)| !is_ansi)
        .map(|(_, text)| text.graphemes(true).map(grapheme_width).sum::<usize>())
        .sum()
}

/// Truncate `text` to at most `max_width` columns, appending `ellipsis` when cut.
///
/// Escape sequences are kept; a reset is emitted after a cut so styles don't leak.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis_width = visible_width(ellipsis);
    if max_width < ellipsis_width {
        return String::new();
    }
    let budget = max_width - ellipsis_width;

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut saw_ansi = false;
    'outer: for (is_ansi, chunk) in segments(text) {
        if is_ansi {
            saw_ansi = true;
            out.push_str(chunk);
            continue;
        }
        for grapheme in chunk.graphemes(true) {
            let width = grapheme_width(grapheme);
            if used + width > budget {
                break 'outer;
            }
            used += width;
            out.push_str(grapheme);
        }
    }
    if saw_ansi {
        out.push_str("\x1b[0m");
    }
    out.push_str(ellipsis);
    out
}

/// Right-pad `text` with spaces to exactly `width` columns (truncating when wider).
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width, "");
    let visible = visible_width(&truncated);
    format!("{truncated}{}", " ".repeat(width.saturating_sub(visible)))
}

/// Byte length of the longest prefix of `word` that fits in `width` columns.
///
/// Escape sequences inside the prefix are kept. At least one grapheme is always taken,
/// so a grapheme wider than `width` overflows instead of stalling the caller.
fn split_point(word: &str, width: usize) -> usize {
    let mut end = 0;
    let mut used = 0;
    let mut taken = false;
    let mut chunk_start = 0;
    for (is_ansi, chunk) in segments(word) {
        if is_ansi {
            chunk_start += chunk.len();
            end = chunk_start;
            continue;
        }
        for (offset, grapheme) in chunk.grapheme_indices(true) {
            let cols = grapheme_width(grapheme);
            if taken && used + cols > width {
                return end;
            }
            used += cols;
            taken = true;
            end = chunk_start + offset + grapheme.len();
        }
        chunk_start += chunk.len();
    }
    end
}

/// Greedy word wrap on whitespace. Words wider than `width` are hard-split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph_start = lines.len();
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let mut word = word;
            let mut word_width = visible_width(word);
            while word_width > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let (head, rest) = word.split_at(split_point(word, width));
                let mut head = head.to_string();
                if head.contains('\x1b') {
                    head.push_str("\x1b[0m");
                }
                lines.push(head);
                word = rest;
                word_width = visible_width(word);
            }
            if word.is_empty() {
                continue;
            }
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        if !current.is_empty() || lines.len() == paragraph_start {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{pad_to_width, truncate_to_width, visible_width, wrap_words};

    #[test]
    fn ansi_ignored_in_width() {
        let input = "hi\x1b[31m!!\x1b[0m";
        assert_eq!(visible_width(input), 4);
    }

    #[test]
    fn osc8_ignored_in_width() {
        let input = "\x1b]8;;https://example.com\x07link\x1b]8;;\x07";
        assert_eq!(visible_width(input), 4);
    }

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(visible_width("日本"), 4);
    }

    #[test]
    fn truncate_appends_ellipsis_and_reset() {
        assert_eq!(truncate_to_width("hello world", 8, "..."), "hello...");
        assert_eq!(
            truncate_to_width("\x1b[1mhello world\x1b[0m", 6, "…"),
            "\x1b[1mhello\x1b[0m…"
        );
        assert_eq!(truncate_to_width("short", 10, "..."), "short");
    }

    #[test]
    fn pad_fills_to_exact_width() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn wrap_breaks_on_words_and_splits_long_words() {
        assert_eq!(wrap_words("word word", 4), vec!["word", "word"]);
        assert_eq!(wrap_words("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_words("", 3), vec![""]);
        assert_eq!(wrap_words("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn wrap_keeps_every_visible_char_of_styled_long_words() {
        assert_eq!(
            wrap_words("\x1b[31mabcdefghij", 3),
            vec!["\x1b[31mabc\x1b[0m", "def", "ghi", "j"]
        );
        assert_eq!(
            wrap_words("\x1b[31mabcdef\x1b[0m", 3),
            vec!["\x1b[31mabc\x1b[0m", "def\x1b[0m"]
        );
    }

    #[test]
    fn wrap_overflows_wide_graphemes_instead_of_stalling() {
        assert_eq!(wrap_words("東京", 1), vec!["東", "京"]);
        assert_eq!(wrap_words("a 東京b", 1), vec!["a", "東", "京", "b"]);
    }
}
