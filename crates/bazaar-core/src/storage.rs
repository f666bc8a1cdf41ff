//! # Key-Value Storage
//!
//! The shell reads the logged-in customer from session storage and keeps the
//! router's reload guard in local storage. Both are plain string maps; this
//! trait is the seam between the pure logic and whatever backs them.
//!
//! Backends:
//! - [`MemoryStorage`] (here) - session-scoped, lost on exit
//! - `FileStorage` (bazaar-shell) - JSON file, survives a reload

use std::collections::BTreeMap;
use std::convert::Infallible;

/// String-to-string storage in the shape of the web storage API.
pub trait KeyValueStorage: Send {
    /// Error raised by the backend. In-memory storage never fails.
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_item(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// In-memory storage, the default backing for session storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for seeding tests.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Infallible> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Infallible> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));

        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("a").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let mut storage = MemoryStorage::new().with_item("x", "y");
        storage.remove_item("nope").unwrap();
        assert_eq!(storage.len(), 1);
    }
}
