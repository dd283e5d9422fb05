use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AppError;
use crate::tracker::Tracker;

/// Shared handle to the one application-state object. Every request, reader
/// or writer, goes through the mutex so at most one mutation is ever in
/// flight.
#[derive(Clone)]
pub struct AppState {
    tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn tracker(&self) -> Result<MutexGuard<'_, Tracker>, AppError> {
        self.tracker.lock().map_err(|_| AppError::InternalServerError)
    }
}
