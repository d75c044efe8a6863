//! Character-count word wrapping with an ellipsis on overflow.
//!
//! Widths are counted in `char`s, not pixels. Proportional fonts make this an
//! approximation; the pane widths are chosen so that typical text fits.

use core::mem;

/// Marker appended to the last kept line when text overflows its line cap
pub const ELLIPSIS: char = '\u{2026}';

/// The bounded, possibly truncated lines produced for one string
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<String>,
    truncated: bool,
}

impl LineSet {
    /// The lines, top to bottom
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when lines were dropped and the last one carries the ellipsis
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Iterate over the lines as `&str`
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Wraps `text` greedily to at most `max_chars_per_line` characters per line,
/// keeping no more than `max_lines` lines.
///
/// On overflow the last kept line loses its final three characters and gains
/// [`ELLIPSIS`]; a last line of three characters or fewer becomes the ellipsis
/// alone. A width of zero is treated as one.
pub fn wrap(text: &str, max_chars_per_line: usize, max_lines: usize) -> LineSet {
    let mut lines = wrap_unbounded(text, max_chars_per_line);
    let truncated = lines.len() > max_lines;
    if truncated {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = mark_truncated(last);
        }
    }
    LineSet { lines, truncated }
}

fn mark_truncated(line: &str) -> String {
    let len = line.chars().count();
    if len > 3 {
        line.chars().take(len - 3).chain([ELLIPSIS]).collect()
    } else {
        ELLIPSIS.to_string()
    }
}

type Chunk = Vec<char>;

fn is_blank(chunk: &[char]) -> bool {
    chunk.first() == Some(&' ')
}

/// Every wrapped line, with no cap applied
pub fn wrap_unbounded(text: &str, max_chars_per_line: usize) -> Vec<String> {
    let width = max_chars_per_line.max(1);
    let mut chunks = split_chunks(text);
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Chunk> = Vec::new();
        let mut line_len = 0;

        // whitespace at a line break is dropped, except before the first line
        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.pop() {
            if line_len + chunk.len() <= width {
                line_len += chunk.len();
                line.push(chunk);
            } else {
                chunks.push(chunk);
                break;
            }
        }

        // a word longer than a whole line fills the remaining room, then continues
        if let Some(chunk) = chunks.last_mut() {
            if chunk.len() > width {
                let head: Chunk = chunk.drain(..width - line_len).collect();
                if !head.is_empty() {
                    line.push(head);
                }
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat().into_iter().collect());
        }
    }
    lines
}

/// Column stop that tabs expand to
const TAB_STOP: usize = 8;

// Only ASCII whitespace separates words; NBSP and friends stay inside them.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Replaces each tab with spaces up to the next tab stop. The column restarts
/// after every line break.
fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_STOP - column % TAB_STOP;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Splits into alternating runs of words and spaces. Tabs are expanded first,
/// then every whitespace character counts as one space; words also break
/// after a hyphen inside a word.
fn split_chunks(text: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Chunk = Vec::new();
    let mut current_blank = false;

    for c in expand_tabs(text).chars() {
        let blank = is_space(c);
        if !current.is_empty() && blank != current_blank {
            chunks.push(mem::take(&mut current));
        }
        current_blank = blank;
        current.push(if blank { ' ' } else { c });
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
        .into_iter()
        .flat_map(|chunk| {
            if is_blank(&chunk) {
                vec![chunk]
            } else {
                split_hyphens(chunk)
            }
        })
        .collect()
}

/// A hyphen at `i` is a break point when it follows two letters (or a
/// letter, hyphen, letter run) and two more letters follow it, possibly
/// around another hyphen.
fn breaks_after(word: &[char], i: usize) -> bool {
    if word[i] != '-' || i < 2 {
        return false;
    }
    let before = (is_letter(word[i - 2]) && is_letter(word[i - 1]))
        || (i >= 3 && is_letter(word[i - 3]) && word[i - 2] == '-' && is_letter(word[i - 1]));
    let letter_at = |j: usize| word.get(j).is_some_and(|&c| is_letter(c));
    let after = letter_at(i + 1)
        && (letter_at(i + 2) || (word.get(i + 2) == Some(&'-') && letter_at(i + 3)));
    before && after
}

fn split_hyphens(word: Chunk) -> Vec<Chunk> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 0..word.len() {
        if breaks_after(&word, i) {
            parts.push(word[start..=i].to_vec());
            start = i + 1;
        }
    }
    parts.push(word[start..].to_vec());
    parts
}
