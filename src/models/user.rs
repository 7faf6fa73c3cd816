//! User model, query types, and course access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user on the Pluvo platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the user was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, unstored user with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: None,
            creation_date: None,
        }
    }
}

/// Filter parameters for listing users.
#[derive(Debug, Default, Clone, Serialize)]
pub struct UsersQuery {
    /// Filter by name substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only users created after this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_from: Option<DateTime<Utc>>,
    /// Only users created before this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_to: Option<DateTime<Utc>>,
    /// Only users that created this course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_course_id: Option<u64>,
    /// Only users following this course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following_course_id: Option<u64>,
}

/// The role a course access token grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Student access to the course content.
    Student,
    /// Manager access, including course administration.
    Manager,
}

impl TokenType {
    /// The path segment used for this token type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Student => "student",
            TokenType::Manager => "manager",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A token granting a user access to a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseToken {
    /// The access token value.
    pub token: String,
}
