//! Persistence adapter: the whole collection lives as one JSON document
//! under one key in an external blob store.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{error, warn};

use crate::models::Activity;

/// External key-value blob store holding a single JSON-serializable document.
pub trait DocumentStore: Send {
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&mut self, document: &str) -> io::Result<()>;
}

/// Production store: one UTF-8 file on local disk.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStore for FileDocumentStore {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, document)
    }
}

/// In-memory store mirroring the file store contract. Clones share the same
/// cell, so tests can keep a handle and inspect what the tracker persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: &str) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.to_string()))),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document.lock().ok().and_then(|cell| cell.clone())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self) -> io::Result<Option<String>> {
        let cell = self
            .document
            .lock()
            .map_err(|_| io::Error::other("document cell poisoned"))?;
        Ok(cell.clone())
    }

    fn write(&mut self, document: &str) -> io::Result<()> {
        let mut cell = self
            .document
            .lock()
            .map_err(|_| io::Error::other("document cell poisoned"))?;
        *cell = Some(document.to_string());
        Ok(())
    }
}

/// Fixed example records used when no document exists yet or the stored one
/// cannot be parsed.
pub fn seed_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: 1,
            title: "Plan a study schedule".to_string(),
            category: "Organization".to_string(),
            date: "2025-12-16".to_string(),
            description: "Set up 25 minute Pomodoro blocks for the main subjects".to_string(),
            like_count: 3,
            hours_studied: 1.5,
            content_covered: "Introduction and timetable".to_string(),
            completed_on: None,
        },
        Activity {
            id: 2,
            title: "Review: Physics - Kinematics".to_string(),
            category: "Physics".to_string(),
            date: "2025-12-19".to_string(),
            description: "Go over uniform and accelerated motion".to_string(),
            like_count: 1,
            hours_studied: 0.0,
            content_covered: String::new(),
            completed_on: None,
        },
        Activity {
            id: 3,
            title: "Problem set: Algebra".to_string(),
            category: "Math".to_string(),
            date: "2025-12-16".to_string(),
            description: "Solve 20 polynomial and equation exercises".to_string(),
            like_count: 0,
            hours_studied: 0.0,
            content_covered: String::new(),
            completed_on: None,
        },
    ]
}

/// Loads the collection. A missing document seeds the store and writes the
/// seed back; an unreadable or malformed one falls back to the seed without
/// persisting anything.
pub fn load(store: &mut dyn DocumentStore) -> Vec<Activity> {
    match store.read() {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Activity>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("stored document is malformed, falling back to seed data: {err}");
                seed_activities()
            }
        },
        Ok(None) => {
            let seed = seed_activities();
            save(store, &seed);
            seed
        }
        Err(err) => {
            warn!("failed to read stored document, falling back to seed data: {err}");
            seed_activities()
        }
    }
}

/// Full-snapshot write. Failures are logged and swallowed so the session
/// continues with in-memory state only.
pub fn save(store: &mut dyn DocumentStore, records: &[Activity]) {
    match serde_json::to_string(records) {
        Ok(document) => {
            if let Err(err) = store.write(&document) {
                error!("failed to persist {} records: {err}", records.len());
            }
        }
        Err(err) => error!("failed to serialize {} records: {err}", records.len()),
    }
}
