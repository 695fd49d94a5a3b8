//! Free-text tag input

/// Ordered, duplicate-free list of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every tag in `raw`. Commas and line breaks (Enter) separate
    /// tags; each is trimmed and blanks and duplicates are dropped.
    /// Returns how many tags were actually added.
    pub fn add_raw(&mut self, raw: &str) -> usize {
        raw.split([',', '\n', '\r'])
            .filter(|tag| self.add(tag))
            .count()
    }

    /// Add one tag. Returns false when it was blank or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag.trim());
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = Self::new();
        for tag in &tags {
            set.add(tag);
        }
        set
    }
}
