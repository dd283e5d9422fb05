use crate::models::{Activity, NewActivityRequest, ProgressUpdateRequest, UpdateActivityRequest};

/// Owns the canonical, ordered collection of activities. Every other
/// component sees read-only snapshots or projections of it.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Activity>,
}

impl RecordStore {
    pub fn new(records: Vec<Activity>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Activity] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&Activity> {
        self.records.iter().find(|a| a.id == id)
    }

    // Ids grow monotonically and are never reused after a delete.
    fn next_id(&self) -> u64 {
        self.records.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn create(&mut self, req: NewActivityRequest, today: &str) -> Activity {
        let date = if req.date.is_empty() {
            today.to_string()
        } else {
            req.date
        };

        let activity = Activity {
            id: self.next_id(),
            title: req.title.trim().to_string(),
            category: req.category.trim().to_string(),
            date,
            description: req.description.trim().to_string(),
            like_count: 0,
            hours_studied: 0.0,
            content_covered: String::new(),
            completed_on: None,
        };

        self.records.push(activity.clone());
        activity
    }

    /// Overwrites exactly the provided field subset. `None` when the id is
    /// not present.
    pub fn update(&mut self, id: u64, req: UpdateActivityRequest) -> Option<Activity> {
        let current = self.records.iter_mut().find(|a| a.id == id)?;

        if let Some(title) = req.title {
            current.title = title.trim().to_string();
        }
        if let Some(category) = req.category {
            current.category = category.trim().to_string();
        }
        if let Some(date) = req.date {
            current.date = date;
        }
        if let Some(description) = req.description {
            current.description = description.trim().to_string();
        }

        Some(current.clone())
    }

    /// Touches only the progress fields; an empty completion date normalizes
    /// to pending.
    pub fn update_progress(&mut self, id: u64, req: ProgressUpdateRequest) -> Option<Activity> {
        let current = self.records.iter_mut().find(|a| a.id == id)?;

        current.hours_studied = req.hours_studied;
        current.content_covered = req.content_covered.trim().to_string();
        current.completed_on = req.completed_on.filter(|date| !date.is_empty());

        Some(current.clone())
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|a| a.id != id);
        self.records.len() != before
    }

    pub fn add_like(&mut self, id: u64) -> bool {
        match self.records.iter_mut().find(|a| a.id == id) {
            Some(activity) => {
                activity.like_count += 1;
                true
            }
            None => false,
        }
    }
}
