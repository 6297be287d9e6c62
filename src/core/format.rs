//! Markdown formatting transforms
//!
//! Every transform takes the full buffer and a character cursor and returns
//! the new buffer with the new cursor. They never fail: invalid input is
//! clamped or ignored.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::position::{byte_index, char_len, line_at};

/// How far either side of the cursor to look for an enclosing wrapper pair
const WRAP_WINDOW: usize = 20;

/// Text inserted by the link command
const LINK_TEMPLATE: &str = "[text](url)";

static HEADING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s*").expect("heading pattern is valid"));

static BOLD_MARK: LazyLock<Regex> = LazyLock::new(|| wrapper_pattern("**"));
static ITALIC_MARK: LazyLock<Regex> = LazyLock::new(|| wrapper_pattern("*"));
static CODE_MARK: LazyLock<Regex> = LazyLock::new(|| wrapper_pattern("`"));

/// Literal search pattern for a wrapper
fn wrapper_pattern(wrapper: &str) -> Regex {
    Regex::new(&regex_lite::escape(wrapper)).expect("escaped wrapper is a valid pattern")
}

/// A formatting command that can be applied at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Bold,
    Italic,
    InlineCode,
    Link,
    CodeBlock,
    ListItem,
    Heading(u8),
}

impl FormatAction {
    /// Menu label
    pub fn label(&self) -> String {
        match self {
            FormatAction::Bold => "Bold".to_string(),
            FormatAction::Italic => "Italic".to_string(),
            FormatAction::InlineCode => "Inline Code".to_string(),
            FormatAction::Link => "Link".to_string(),
            FormatAction::CodeBlock => "Code Block".to_string(),
            FormatAction::ListItem => "List".to_string(),
            FormatAction::Heading(level) => format!("Heading {}", level),
        }
    }
}

/// Apply a formatting action
pub fn apply(action: FormatAction, text: &str, cursor: usize) -> (String, usize) {
    match action {
        FormatAction::Bold => bold(text, cursor),
        FormatAction::Italic => italic(text, cursor),
        FormatAction::InlineCode => inline_code(text, cursor),
        FormatAction::Link => link(text, cursor),
        FormatAction::CodeBlock => code_block(text, cursor),
        FormatAction::ListItem => list_item(text, cursor),
        FormatAction::Heading(level) => heading(text, cursor, level),
    }
}

/// Toggle `**` around the cursor
pub fn bold(text: &str, cursor: usize) -> (String, usize) {
    toggle_wrapper(text, cursor, "**", &BOLD_MARK)
}

/// Toggle `*` around the cursor
pub fn italic(text: &str, cursor: usize) -> (String, usize) {
    toggle_wrapper(text, cursor, "*", &ITALIC_MARK)
}

/// Toggle backticks around the cursor
pub fn inline_code(text: &str, cursor: usize) -> (String, usize) {
    toggle_wrapper(text, cursor, "`", &CODE_MARK)
}

/// Remove the wrapper pair enclosing the cursor, or insert an empty one
fn toggle_wrapper(text: &str, cursor: usize, wrapper: &str, pattern: &Regex) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let pos = cursor.min(chars.len());
    let wrapper_len = char_len(wrapper);

    let left = pos.saturating_sub(WRAP_WINDOW);
    let right = (pos + WRAP_WINDOW).min(chars.len());
    let window: String = chars[left..right].iter().collect();
    let search_pos = pos - left;

    // Char offsets of each wrapper occurrence inside the window
    let starts: Vec<usize> = pattern
        .find_iter(&window)
        .map(|m| char_len(&window[..m.start()]))
        .collect();

    for pair in starts.chunks_exact(2) {
        let (open, close) = (pair[0], pair[1]);
        if open + wrapper_len <= search_pos && search_pos <= close {
            let start = left + open;
            let end = left + close + wrapper_len;
            let content: String = chars[start + wrapper_len..end - wrapper_len].iter().collect();

            let mut result: String = chars[..start].iter().collect();
            result.push_str(&content);
            result.extend(&chars[end..]);
            return (result, start + char_len(&content));
        }
    }

    let split = byte_index(text, pos);
    let mut result = String::with_capacity(text.len() + wrapper.len() * 2);
    result.push_str(&text[..split]);
    result.push_str(wrapper);
    result.push_str(wrapper);
    result.push_str(&text[split..]);
    (result, pos + wrapper_len)
}

/// Set the heading level of the cursor's line
pub fn heading(text: &str, cursor: usize, level: u8) -> (String, usize) {
    if !(1..=6).contains(&level) {
        return (text.to_string(), cursor);
    }

    let pos = cursor.min(char_len(text));
    let mut lines: Vec<&str> = text.split('\n').collect();
    let (target, line_start) = line_at(&lines, pos);
    let line = lines[target];

    let body = match HEADING_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line,
    };
    let new_line = format!("{} {}", "#".repeat(level as usize), body);

    let old_len = char_len(line) as isize;
    let new_len = char_len(&new_line) as isize;
    let pos_in_line = (pos - line_start) as isize;
    let new_col = (pos_in_line + (new_len - old_len)).clamp(0, new_len) as usize;

    lines[target] = &new_line;
    (lines.join("\n"), line_start + new_col)
}

/// Insert a link template and put the cursor on its text
pub fn link(text: &str, cursor: usize) -> (String, usize) {
    let pos = cursor.min(char_len(text));
    let split = byte_index(text, pos);
    let result = format!("{}{}{}", &text[..split], LINK_TEMPLATE, &text[split..]);
    (result, pos + 1)
}

/// Insert an empty fenced code block, starting a new line if needed
pub fn code_block(text: &str, cursor: usize) -> (String, usize) {
    let pos = cursor.min(char_len(text));
    let split = byte_index(text, pos);
    let at_line_start = pos == 0 || text[..split].ends_with('\n');

    let (block, offset) = if at_line_start {
        ("```\n\n```\n", 4)
    } else {
        ("\n```\n\n```\n", 5)
    };

    let result = format!("{}{}{}", &text[..split], block, &text[split..]);
    (result, pos + offset)
}

/// Toggle a `- ` list marker on the cursor's line
pub fn list_item(text: &str, cursor: usize) -> (String, usize) {
    let pos = cursor.min(char_len(text));
    let mut lines: Vec<&str> = text.split('\n').collect();
    let (target, line_start) = line_at(&lines, pos);
    let line = lines[target];

    let stripped = line.trim_start();
    let indent = &line[..line.len() - stripped.len()];

    let (new_line, new_pos) = match stripped.strip_prefix("- ") {
        Some(rest) => (format!("{}{}", indent, rest), pos.saturating_sub(2)),
        None => (format!("{}- {}", indent, stripped), pos + 2),
    };

    let line_end = line_start + char_len(&new_line);
    let new_pos = new_pos.clamp(line_start, line_end);

    lines[target] = &new_line;
    (lines.join("\n"), new_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrapper_patterns_are_literal() {
        assert_eq!(BOLD_MARK.find_iter("a**b**").count(), 2);
        assert_eq!(ITALIC_MARK.find_iter("a**b").count(), 2);
        assert_eq!(CODE_MARK.find_iter("`x` y").count(), 2);
        assert_eq!(italic("a**b", 2), ("ab".to_string(), 1));
    }

    #[test]
    fn test_bold_inserts_empty_pair() {
        let (text, pos) = bold("hello world", 5);
        assert_eq!(text, "hello**** world");
        assert_eq!(pos, 7);
    }

    #[test]
    fn test_bold_removes_enclosing_pair() {
        let (text, pos) = bold("say **loud** now", 8);
        assert_eq!(text, "say loud now");
        assert_eq!(pos, 8);
    }

    #[test]
    fn test_bold_toggle_restores_text() {
        let (wrapped, pos) = bold("abc", 3);
        assert_eq!(wrapped, "abc****");
        let (text, pos) = bold(&wrapped, pos);
        assert_eq!(text, "abc");
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_italic_and_inline_code() {
        let (text, pos) = italic("x", 1);
        assert_eq!((text.as_str(), pos), ("x**", 2));

        let (text, pos) = inline_code("call `foo()` here", 8);
        assert_eq!(text, "call foo() here");
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_wrapper_outside_window_is_ignored() {
        let source = format!("**{}**", "a".repeat(30));
        // The opening marker is more than 20 characters away
        let (text, pos) = bold(&source, 25);
        assert_eq!(char_len(&text), char_len(&source) + 4);
        assert_eq!(pos, 27);
    }

    #[test]
    fn test_wrap_with_multibyte_text() {
        let (text, pos) = bold("café **crème** ok", 9);
        assert_eq!(text, "café crème ok");
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_heading_adds_prefix() {
        let (text, pos) = heading("first\nsecond", 8, 2);
        assert_eq!(text, "first\n## second");
        assert_eq!(pos, 11);
    }

    #[test]
    fn test_heading_replaces_prefix() {
        let (text, pos) = heading("### Title", 9, 1);
        assert_eq!(text, "# Title");
        assert_eq!(pos, 7);

        // A cursor inside the old marker cannot move before the line start
        let (text, pos) = heading("###### Deep", 0, 1);
        assert_eq!(text, "# Deep");
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_heading_invalid_level_is_noop() {
        assert_eq!(heading("text", 2, 0), ("text".to_string(), 2));
        assert_eq!(heading("text", 2, 7), ("text".to_string(), 2));
    }

    #[test]
    fn test_link() {
        let (text, pos) = link("see ", 4);
        assert_eq!(text, "see [text](url)");
        assert_eq!(pos, 5);
    }

    #[test]
    fn test_code_block_mid_line() {
        let (text, pos) = code_block("abc", 3);
        assert_eq!(text, "abc\n```\n\n```\n");
        assert_eq!(pos, 8);
        assert_eq!(text.chars().nth(pos), Some('\n'));
    }

    #[test]
    fn test_code_block_at_line_start() {
        let (text, pos) = code_block("abc\n", 4);
        assert_eq!(text, "abc\n```\n\n```\n");
        assert_eq!(pos, 8);

        let (text, pos) = code_block("", 0);
        assert_eq!(text, "```\n\n```\n");
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_list_item_toggle() {
        let (text, pos) = list_item("one\n  two", 7);
        assert_eq!(text, "one\n  - two");
        assert_eq!(pos, 9);

        let (text, pos) = list_item(&text, pos);
        assert_eq!(text, "one\n  two");
        assert_eq!(pos, 7);
    }

    #[test]
    fn test_list_item_cursor_stays_on_line() {
        let (text, pos) = list_item("top\n- item", 4);
        assert_eq!(text, "top\nitem");
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_apply_dispatch() {
        assert_eq!(
            apply(FormatAction::Heading(3), "x", 0),
            heading("x", 0, 3)
        );
        assert_eq!(apply(FormatAction::Link, "", 0), link("", 0));
        assert_eq!(FormatAction::Heading(4).label(), "Heading 4");
    }
}
