use std::collections::HashMap;

/// Tracks identifiers case-insensitively while remembering the first spelling seen.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Insert a name. Returns the earlier spelling when the name clashes with
    /// one already present.
    pub fn insert(&mut self, name: &str) -> Option<&str> {
        let key = name.to_ascii_lowercase();
        if self.map.contains_key(&key) {
            return self.map.get(&key).map(String::as_str);
        }
        self.map.insert(key, name.to_string());
        None
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
