/// Bounded buffer of activity lines shown beside the conversation.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

const MAX_ENTRIES: usize = 200;

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }
}
