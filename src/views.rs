//! Pure projections over a snapshot of the record collection. Nothing here
//! holds state; every view is recomputed from the records it is handed.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Activity;

/// Hours of registered study that fill the progress bar. The bar caps at 99%
/// until the record is explicitly completed.
const HOURS_FOR_FULL_PROGRESS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    None,
    Title,
    Date,
    Likes,
}

/// Transient list state: search text, category selection (`None` = all) and
/// sort order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub category: Option<String>,
    pub sort: SortMode,
}

/// Case-insensitive title search and exact category match, conjunctive, then
/// the requested ordering. `SortMode::None` keeps insertion order.
pub fn list_filtered(records: &[Activity], filter: &FilterState) -> Vec<Activity> {
    let needle = filter.search.to_lowercase();

    let mut list: Vec<Activity> = records
        .iter()
        .filter(|a| a.title.to_lowercase().contains(&needle))
        .filter(|a| match &filter.category {
            Some(category) => &a.category == category,
            None => true,
        })
        .cloned()
        .collect();

    match filter.sort {
        SortMode::None => {}
        SortMode::Title => list.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortMode::Date => list.sort_by(|a, b| compare_dates(&a.date, &b.date)),
        SortMode::Likes => list.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
    }

    list
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    let parse = |value: &str| NaiveDate::parse_from_str(value, "%Y-%m-%d");
    match (parse(a), parse(b)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => a.cmp(b),
    }
}

/// The sorted set of distinct, non-empty, trimmed categories. Recomputed,
/// never stored.
pub fn categories(records: &[Activity]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for activity in records {
        let category = activity.category.trim();
        if !category.is_empty() {
            set.insert(category.to_string());
        }
    }
    set.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub total_hours: f64,
    pub top_category: String,
}

pub fn stats(records: &[Activity]) -> DashboardStats {
    let completed = records.iter().filter(|a| a.is_completed()).count();
    let hours: f64 = records.iter().map(|a| a.hours_studied).sum();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for activity in records {
        *counts.entry(activity.category.as_str()).or_insert(0) += 1;
    }

    // Strictly-greater scan in collection order, so ties go to the category
    // encountered first.
    let mut top_category = "N/A".to_string();
    let mut max = 0;
    for activity in records {
        let count = counts[activity.category.as_str()];
        if count > max {
            max = count;
            top_category = activity.category.clone();
        }
    }

    DashboardStats {
        total: records.len(),
        completed,
        total_hours: (hours * 10.0).round() / 10.0,
        top_category,
    }
}

/// Groups records by their exact date string.
pub fn activities_by_date(records: &[Activity]) -> BTreeMap<String, Vec<Activity>> {
    let mut buckets: BTreeMap<String, Vec<Activity>> = BTreeMap::new();
    for activity in records {
        buckets
            .entry(activity.date.clone())
            .or_default()
            .push(activity.clone());
    }
    buckets
}

/// The drill-down listing for one calendar day, title-sorted.
pub fn activities_on(records: &[Activity], date: &str) -> Vec<Activity> {
    let mut list: Vec<Activity> = records.iter().filter(|a| a.date == date).cloned().collect();
    list.sort_by(|a, b| compare_titles(&a.title, &b.title));
    list
}

/// 100 only once the record is explicitly completed; otherwise a linear ramp
/// over registered hours, capped at 99.
pub fn progress_percent(activity: &Activity) -> u8 {
    if activity.is_completed() {
        return 100;
    }
    let percent = (activity.hours_studied / HOURS_FOR_FULL_PROGRESS * 100.0).min(99.0);
    percent.max(0.0).floor() as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 in a Sunday-first week grid.
    pub leading_blanks: u8,
    pub days: Vec<DaySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub day: u32,
    pub is_today: bool,
    pub titles: Vec<String>,
}

/// The month grid: one summary per day carrying the titles scheduled on it.
/// `None` for an invalid year/month pair.
pub fn month_view(
    records: &[Activity],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let buckets = activities_by_date(records);

    let mut days = Vec::new();
    let mut date = first;
    while date.month() == month && date.year() == year {
        let key = date.format("%Y-%m-%d").to_string();
        let titles = buckets
            .get(&key)
            .map(|list| list.iter().map(|a| a.title.clone()).collect())
            .unwrap_or_default();
        days.push(DaySummary {
            date: key,
            day: date.day(),
            is_today: date == today,
            titles,
        });
        date = date.succ_opt()?;
    }

    Some(MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday() as u8,
        days,
    })
}
