//! Command history with arrow-key recall.

/// Submitted lines (oldest first) and the recall cursor.
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
    /// `None` while not recalling
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Forget the recall position (the user edited the line).
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Step to an older entry, stopping at the oldest.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// Step to a newer entry.
    ///
    /// Returns `None` when not recalling (the line is left alone),
    /// `Some("")` when stepping past the newest entry, which ends recall.
    pub fn newer(&mut self) -> Option<&str> {
        let idx = self.cursor? + 1;
        if idx >= self.entries.len() {
            self.cursor = None;
            return Some("");
        }
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }
}
