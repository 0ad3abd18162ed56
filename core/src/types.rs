//! Domain DTOs for the todo API.
//!
//! # Design
//! `Task` is defined independently from the mock-server crate; integration
//! tests catch schema drift. The wire names differ from the Rust field names
//! for `userId` and `finished`, so both are renamed explicitly.

use serde::{Deserialize, Serialize};

/// A single todo item as exchanged with the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    #[serde(rename = "finished")]
    pub is_finished: bool,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        is_finished: bool,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            is_finished,
        }
    }
}
