//! Unique id generation
//!
//! Owned by the host and injected wherever a component needs to give an
//! element an id. The counter only grows, and ids already present in the
//! document are skipped.

use aw_dom::Document;

/// Monotonic id generator
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }

    /// Next id, without checking the document
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }

    /// Next id not already used in `doc`
    pub fn unique_id(&mut self, doc: &Document) -> String {
        loop {
            let id = self.next_id();
            if doc.get_element_by_id(&id).is_none() {
                return id;
            }
        }
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("aw")
    }
}
