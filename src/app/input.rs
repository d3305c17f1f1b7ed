//! A single-line editable text field with cursor tracking.

/// Cursor is a char index into `value`, not a byte index.
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
    /// Render as bullets (tokens, API keys)
    pub secret: bool,
}

impl InputField {
    pub fn new(label: &'static str) -> Self {
        Self { label, value: String::new(), cursor: 0, secret: false }
    }

    pub fn secret(label: &'static str) -> Self {
        Self { label, value: String::new(), cursor: 0, secret: true }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
        self
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value.char_indices().nth(char_index).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// What the field shows: the value, or bullets for secret fields.
    pub fn display_value(&self) -> String {
        if self.secret { "•".repeat(self.value.chars().count()) } else { self.value.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut f = InputField::new("Path");
        for c in "abc".chars() {
            f.insert_char(c);
        }
        f.move_left();
        f.insert_char('X');
        assert_eq!(f.value, "abXc");
        f.backspace();
        assert_eq!(f.value, "abc");
        assert_eq!(f.cursor, 2);
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut f = InputField::new("Path");
        f.insert_char('é');
        f.insert_char('x');
        f.move_home();
        f.delete();
        assert_eq!(f.value, "x");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut f = InputField::new("Path").with_value("hi");
        f.move_right();
        assert_eq!(f.cursor, 2);
        f.move_end();
        f.move_left();
        f.move_left();
        f.move_left();
        assert_eq!(f.cursor, 0);
        f.backspace();
        assert_eq!(f.value, "hi");
    }

    #[test]
    fn secret_field_masks_display() {
        let f = InputField::secret("Token").with_value("ghp_abc");
        assert_eq!(f.display_value(), "•••••••");
    }
}
