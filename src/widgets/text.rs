/// Lines shown by [`truncate_lines`] unless told otherwise.
pub const MAX_LINES: usize = 2;
/// Width hint for single-line text entries in settings forms.
pub const ENTRY_WIDTH_CHARS: u32 = 20;
/// Width hint for preview labels in settings forms.
pub const PREVIEW_MAX_CHARS: u32 = 30;

/// Replaces `\n`, `\t` and `\\` with the characters they stand for.
///
/// Any other backslash is kept as typed.
pub fn process_escape_sequences(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            let replacement = match chars.peek() {
                Some('n') => Some('\n'),
                Some('t') => Some('\t'),
                Some('\\') => Some('\\'),
                _ => None,
            };
            if let Some(replacement) = replacement {
                chars.next();
                result.push(replacement);
                continue;
            }
        }
        result.push(c);
    }

    result
}

/// Keeps the first `max_lines` lines, appending `…` when anything was cut.
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }

    let mut truncated = lines[..max_lines].join("\n");
    truncated.push('…');
    truncated
}
