//! Navigable-location port.
//!
//! The synchronizer talks to navigation through this trait so the core can
//! run headless; a browser-history adapter lives with the embedding shell.

use std::sync::Mutex;

/// A path plus its query string (no leading `?`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Full shareable form: `path` or `path?query`
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// Navigation abstraction for reading and pushing locations
pub trait Navigator: Send + Sync {
    /// Current location
    fn location(&self) -> Location;

    /// Navigate to a new path + query
    fn push(&self, path: &str, query: &str);
}

/// In-memory navigator for tests and headless use
pub struct MemoryNavigator {
    history: Mutex<Vec<Location>>,
}

impl MemoryNavigator {
    pub fn new(initial: Location) -> Self {
        Self {
            history: Mutex::new(vec![initial]),
        }
    }

    pub fn at_path(path: impl Into<String>) -> Self {
        Self::new(Location::new(path, ""))
    }

    /// Number of locations visited, including the initial one
    pub fn history_len(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        self.history
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| Location::new("/", ""))
    }

    fn push(&self, path: &str, query: &str) {
        self.history
            .lock()
            .unwrap()
            .push(Location::new(path, query));
    }
}
