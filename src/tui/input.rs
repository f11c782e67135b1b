//! Search input state for the TUI

/// Query line with a cursor. All edits are char-boundary safe.
pub struct InputState {
    pub query: String,
    pub cursor_pos: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
        }
    }
}

impl InputState {
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.query.remove(prev);
        self.cursor_pos = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.query.len() {
            return false;
        }
        self.query.remove(self.cursor_pos);
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.cursor_pos = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_respect_utf8_boundaries() {
        let mut input = InputState::default();
        for c in "crêpe".chars() {
            input.insert(c);
        }
        assert_eq!(input.query, "crêpe");

        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.query, "cr");
        assert_eq!(input.cursor_pos, 2);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut input = InputState::default();
        for c in "té".chars() {
            input.insert(c);
        }
        input.move_left();
        assert_eq!(input.cursor_pos, 1);
        input.move_right();
        assert_eq!(input.cursor_pos, input.query.len());
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut input = InputState::default();
        input.insert('a');
        assert!(!input.delete());
        assert_eq!(input.query, "a");
    }
}
