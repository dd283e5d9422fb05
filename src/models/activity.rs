use serde::{Deserialize, Serialize};

/// One study activity. Serialized as-is into the persisted document, so the
/// three progress fields default when an older document lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub like_count: u32,
    #[serde(default)]
    pub hours_studied: f64,
    #[serde(default)]
    pub content_covered: String,
    #[serde(default)]
    pub completed_on: Option<String>,
}

impl Activity {
    /// Completed means a non-empty completion date.
    pub fn is_completed(&self) -> bool {
        matches!(&self.completed_on, Some(date) if !date.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivityRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdateRequest {
    pub hours_studied: f64,
    #[serde(default)]
    pub content_covered: String,
    #[serde(default)]
    pub completed_on: Option<String>,
}
