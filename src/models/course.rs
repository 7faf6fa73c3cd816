//! Course model and query types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course on the Pluvo platform.
///
/// A course without an `id` has not been stored yet; upserting it creates
/// the course, and the response carries the assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Course title.
    pub title: String,
    /// Course description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start of the publication window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_from: Option<DateTime<Utc>>,
    /// End of the publication window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_to: Option<DateTime<Utc>>,
    /// Identifier of the creating user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    /// When the course was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl Course {
    /// Create a new, unstored course with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            published_from: None,
            published_to: None,
            creator_id: None,
            creation_date: None,
        }
    }
}

/// Filter parameters for listing courses.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CoursesQuery {
    /// Filter by title substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Filter by description substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only courses published after this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_from: Option<DateTime<Utc>>,
    /// Only courses published before this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_to: Option<DateTime<Utc>>,
    /// Only courses followed by this student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    /// Only courses created by this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    /// Only courses created after this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_from: Option<DateTime<Utc>>,
    /// Only courses created before this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_to: Option<DateTime<Utc>>,
}

/// Filter body for course search.
///
/// Search travels as a POST body rather than a query string, for filter
/// sets (such as long id lists) too large for a URL.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CourseSearch {
    /// Restrict to these course ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
    /// Restrict to courses followed by any of these students.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub student_ids: Vec<u64>,
    /// Filter by title substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
