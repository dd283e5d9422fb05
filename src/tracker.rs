use chrono::Local;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{Activity, NewActivityRequest, ProgressUpdateRequest, UpdateActivityRequest};
use crate::storage::{self, DocumentStore};
use crate::store::RecordStore;
use crate::views::{self, DashboardStats, FilterState, MonthView, SortMode};

const MIN_TITLE_CHARS: usize = 3;

/// The owned application state and the single choke point every mutation
/// passes through. After each change to the collection it writes the full
/// snapshot through to the document store, recomputes the category set and
/// re-validates the transient category selection, so no derived view can
/// outlive one dispatch cycle.
pub struct Tracker {
    store: RecordStore,
    document: Box<dyn DocumentStore>,
    filter: FilterState,
    categories: Vec<String>,
}

impl Tracker {
    pub fn open(mut document: Box<dyn DocumentStore>) -> Self {
        let records = storage::load(document.as_mut());
        info!("loaded {} activities", records.len());
        let categories = views::categories(&records);

        Self {
            store: RecordStore::new(records),
            document,
            filter: FilterState::default(),
            categories,
        }
    }

    fn dispatch(&mut self) {
        storage::save(self.document.as_mut(), self.store.records());
        self.categories = views::categories(self.store.records());

        // Keep the selected category only while records for it still exist.
        if let Some(selected) = &self.filter.category {
            if !self.categories.contains(selected) {
                self.filter.category = None;
            }
        }

        debug!(
            "dispatched: {} records, {} categories",
            self.store.records().len(),
            self.categories.len()
        );
    }

    pub fn create(&mut self, req: NewActivityRequest) -> Result<Activity, AppError> {
        validate_title(&req.title)?;

        let created = self.store.create(req, &today());
        self.dispatch();
        Ok(created)
    }

    pub fn update(
        &mut self,
        id: u64,
        req: UpdateActivityRequest,
    ) -> Result<Option<Activity>, AppError> {
        if let Some(title) = &req.title {
            validate_title(title)?;
        }

        let updated = self.store.update(id, req);
        if updated.is_some() {
            self.dispatch();
        }
        Ok(updated)
    }

    pub fn update_progress(
        &mut self,
        id: u64,
        req: ProgressUpdateRequest,
    ) -> Result<Option<Activity>, AppError> {
        validate_hours(req.hours_studied)?;

        let updated = self.store.update_progress(id, req);
        if updated.is_some() {
            self.dispatch();
        }
        Ok(updated)
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.dispatch();
        }
        removed
    }

    pub fn like(&mut self, id: u64) -> bool {
        let liked = self.store.add_like(id);
        if liked {
            self.dispatch();
        }
        liked
    }

    pub fn records(&self) -> &[Activity] {
        self.store.records()
    }

    pub fn get(&self, id: u64) -> Option<&Activity> {
        self.store.get(id)
    }

    pub fn list_filtered(&self) -> Vec<Activity> {
        views::list_filtered(self.store.records(), &self.filter)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn stats(&self) -> DashboardStats {
        views::stats(self.store.records())
    }

    pub fn activities_on(&self, date: &str) -> Vec<Activity> {
        views::activities_on(self.store.records(), date)
    }

    pub fn month_view(&self, year: i32, month: u32) -> Option<MonthView> {
        views::month_view(
            self.store.records(),
            year,
            month,
            Local::now().date_naive(),
        )
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search(&mut self, search: String) {
        self.filter.search = search;
    }

    /// "all" clears the selection; anything else selects that exact category.
    pub fn set_category(&mut self, category: &str) {
        self.filter.category = if category == "all" {
            None
        } else {
            Some(category.to_string())
        };
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.filter.sort = sort;
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().chars().count() < MIN_TITLE_CHARS {
        return Err(AppError::BadRequest(
            "Title must be at least 3 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_hours(hours: f64) -> Result<(), AppError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::BadRequest(
            "Hours studied must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;

    fn tracker() -> Tracker {
        // Seeded from an empty document store.
        let mut store = MemoryDocumentStore::new();
        storage::save(&mut store, &[]);
        Tracker::open(Box::new(store))
    }

    fn request(title: &str, category: &str) -> NewActivityRequest {
        NewActivityRequest {
            title: title.to_string(),
            category: category.to_string(),
            date: "2025-12-16".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn short_title_is_rejected_before_any_mutation() {
        let mut tracker = tracker();

        let err = tracker.create(request("ab", "Math")).expect_err("too short");
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(tracker.records().is_empty());

        // Surrounding whitespace does not count toward the minimum.
        let err = tracker.create(request("  a  ", "Math")).expect_err("too short");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn update_validates_title_only_when_provided() {
        let mut tracker = tracker();
        let created = tracker.create(request("Study", "Math")).expect("valid");

        let err = tracker
            .update(
                created.id,
                UpdateActivityRequest {
                    title: Some("ab".to_string()),
                    category: None,
                    date: None,
                    description: None,
                },
            )
            .expect_err("too short");
        assert!(matches!(err, AppError::BadRequest(_)));

        let updated = tracker
            .update(
                created.id,
                UpdateActivityRequest {
                    title: None,
                    category: Some("Physics".to_string()),
                    date: None,
                    description: None,
                },
            )
            .expect("valid")
            .expect("found");
        assert_eq!(updated.category, "Physics");
    }

    #[test]
    fn negative_or_non_finite_hours_are_rejected() {
        let mut tracker = tracker();
        let created = tracker.create(request("Study", "Math")).expect("valid");

        for hours in [-1.0, f64::NAN, f64::INFINITY] {
            let err = tracker
                .update_progress(
                    created.id,
                    ProgressUpdateRequest {
                        hours_studied: hours,
                        content_covered: String::new(),
                        completed_on: None,
                    },
                )
                .expect_err("invalid hours");
            assert!(matches!(err, AppError::BadRequest(_)));
        }

        assert_eq!(tracker.get(created.id).expect("found").hours_studied, 0.0);
    }

    #[test]
    fn category_set_follows_the_collection() {
        let mut tracker = tracker();
        tracker.create(request("First", " Chemistry ")).expect("valid");
        tracker.create(request("Second", "Math")).expect("valid");

        assert_eq!(tracker.categories(), ["Chemistry", "Math"]);

        let id = tracker.records()[0].id;
        tracker.delete(id);
        assert_eq!(tracker.categories(), ["Math"]);
    }

    #[test]
    fn selected_category_reverts_to_all_when_its_last_record_goes() {
        let mut tracker = tracker();
        tracker.create(request("Math drill", "Math")).expect("valid");
        let physics = tracker.create(request("Physics recap", "Physics")).expect("valid");

        tracker.set_category("Physics");
        assert_eq!(tracker.list_filtered().len(), 1);

        tracker.delete(physics.id);
        assert_eq!(tracker.filter().category, None);
        assert_eq!(tracker.list_filtered().len(), 1);
    }

    #[test]
    fn selected_category_survives_unrelated_mutations() {
        let mut tracker = tracker();
        tracker.create(request("Math drill", "Math")).expect("valid");
        let physics = tracker.create(request("Physics recap", "Physics")).expect("valid");

        tracker.set_category("Math");
        tracker.delete(physics.id);

        assert_eq!(tracker.filter().category.as_deref(), Some("Math"));
    }

    #[test]
    fn filter_state_drives_the_list() {
        let mut tracker = tracker();
        tracker.create(request("Algebra Review", "Math")).expect("valid");
        tracker.create(request("Algebra Drill", "Physics")).expect("valid");

        tracker.set_search("algebra".to_string());
        tracker.set_category("Math");

        let list = tracker.list_filtered();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Algebra Review");

        tracker.set_category("all");
        assert_eq!(tracker.list_filtered().len(), 2);
    }
}
