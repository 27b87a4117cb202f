mod error;

pub mod artist;
pub mod show;
pub mod venue;

pub use error::{ServiceError, ServiceResult};

use serde::Serialize;

/// One name-search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub id: i64,
    pub name: String,
}

/// Response body of the venue/artist name search: `{count, data}`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}
