pub mod activity;

pub use activity::{Activity, NewActivityRequest, ProgressUpdateRequest, UpdateActivityRequest};
