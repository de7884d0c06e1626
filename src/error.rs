use thiserror::Error;

/// The single failure mode of parsing MathJSON text.
///
/// `position` is a character offset into the parsed text when one is known.
/// Syntax errors reported by the JSON reader carry one; structural errors
/// found after the JSON is read (wrong shape, bad number text) do not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", fmt_position(.position))]
pub struct ParseError {
    pub message: String,
    pub position: Option<usize>,
}

impl ParseError {
    pub fn new<M: Into<String>>(message: M, position: Option<usize>) -> Self {
        Self { message: message.into(), position }
    }

    /// Convert a JSON syntax error into a `ParseError` pointing at the
    /// offending character of `text`.
    pub(crate) fn from_json(text: &str, err: &serde_json::Error) -> Self {
        let message = format!("Invalid JSON: {}", strip_location(&err.to_string()));
        Self::new(message, char_offset(text, err.line(), err.column()))
    }
}

fn fmt_position(position: &Option<usize>) -> String {
    match position {
        Some(pos) => format!(" at position {}", pos),
        None => String::new(),
    }
}

// serde_json appends " at line L column C"; we report a single offset instead
fn strip_location(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(idx) => &message[..idx],
        None => message,
    }
}

/// Map serde_json's 1-based line/column (column counted in bytes) to a
/// 0-based character offset.
fn char_offset(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut byte = 0usize;
    for (idx, segment) in text.split('\n').enumerate() {
        if idx + 1 == line {
            byte += column.saturating_sub(1).min(segment.len());
            return Some(text.char_indices().take_while(|(i, _)| *i < byte).count());
        }
        byte += segment.len() + 1;
    }
    Some(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_position() {
        assert_eq!(ParseError::new("boom", Some(3)).to_string(), "boom at position 3");
        assert_eq!(ParseError::new("boom", None).to_string(), "boom");
    }

    #[test]
    fn json_error_offset_on_second_line() {
        let text = "[\"Add\",\n 1,,]";
        let err = serde_json::from_str::<serde_json::Value>(text).unwrap_err();
        let parsed = ParseError::from_json(text, &err);
        assert!(parsed.message.starts_with("Invalid JSON"));
        assert!(!parsed.message.contains("line"));
        let pos = parsed.position.unwrap();
        assert!(pos >= 8 && pos <= text.chars().count());
    }
}
