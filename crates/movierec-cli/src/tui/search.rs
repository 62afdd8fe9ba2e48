//! Search box input shared by the home page and the dashboard.

use unicode_normalization::UnicodeNormalization;

/// Editable search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    /// Raw text as typed.
    pub buffer: String,
    /// Whether keystrokes go into the box.
    pub editing: bool,
}

impl SearchBox {
    /// Starts editing, keeping the current text.
    pub const fn begin(&mut self) {
        self.editing = true;
    }

    /// Stops editing without submitting.
    pub const fn cancel(&mut self) {
        self.editing = false;
    }

    /// Appends a character.
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Removes the last character.
    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Empties the box and stops editing.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.editing = false;
    }

    /// Stops editing and returns the normalized query (possibly empty).
    pub fn submit(&mut self) -> String {
        self.editing = false;
        normalize_query(&self.buffer)
    }
}

/// NFKC-normalizes and trims a query so full-width input matches.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    String::from(normalized.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        // Arrange & Act & Assert
        assert_eq!(normalize_query("  matrix \t"), "matrix");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_normalize_full_width() {
        // Arrange & Act & Assert
        assert_eq!(normalize_query("\u{FF2D}\u{FF41}\u{FF54}\u{FF52}\u{FF49}\u{FF58}"), "Matrix");
    }

    #[test]
    fn test_submit_stops_editing() {
        // Arrange
        let mut search = SearchBox::default();
        search.begin();
        for c in " heat ".chars() {
            search.push(c);
        }

        // Act
        let query = search.submit();

        // Assert
        assert_eq!(query, "heat");
        assert!(!search.editing);
        assert_eq!(search.buffer, " heat ");
    }

    #[test]
    fn test_pop_and_clear() {
        // Arrange
        let mut search = SearchBox::default();
        search.begin();
        search.push('a');
        search.push('b');

        // Act
        search.pop();

        // Assert
        assert_eq!(search.buffer, "a");
        search.clear();
        assert!(search.buffer.is_empty());
        assert!(!search.editing);
    }
}
