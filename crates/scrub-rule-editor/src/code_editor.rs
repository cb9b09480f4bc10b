//! Raw code editor seam
//!
//! The widget itself (highlighting, buffer internals) belongs to the front
//! end. The view only needs to read, replace and configure its text.

use scrub_settings::SyntaxMode;

pub trait CodeEditor: Send {
    /// Full text of the editor
    fn value(&self) -> String;

    /// Replace the text and move the cursor to the start
    fn set_value(&mut self, text: &str);

    /// Apply font and syntax settings once the editor is visible
    fn configure(&mut self, _font_size: u16, _mode: SyntaxMode) {}
}

/// In-memory [`CodeEditor`], used when no widget is attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    text: String,
    cursor: usize,
    font_size: Option<u16>,
    mode: Option<SyntaxMode>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn font_size(&self) -> Option<u16> {
        self.font_size
    }

    pub fn mode(&self) -> Option<SyntaxMode> {
        self.mode
    }
}

impl CodeEditor for CodeBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = 0;
    }

    fn configure(&mut self, font_size: u16, mode: SyntaxMode) {
        self.font_size = Some(font_size);
        self.mode = Some(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_resets_cursor() {
        let mut buffer = CodeBuffer::with_text("old");
        buffer.cursor = 3;
        buffer.set_value("public class Rule {}");
        assert_eq!(buffer.value(), "public class Rule {}");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_configure() {
        let mut buffer = CodeBuffer::new();
        assert_eq!(buffer.font_size(), None);
        buffer.configure(14, SyntaxMode::Java);
        assert_eq!(buffer.font_size(), Some(14));
        assert_eq!(buffer.mode(), Some(SyntaxMode::Java));
    }
}
