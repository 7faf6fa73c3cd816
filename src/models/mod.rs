//! Data models for the Pluvo API.

mod course;
mod media;
mod organisation;
mod user;

pub use course::{Course, CourseSearch, CoursesQuery};
pub use media::UploadToken;
pub use organisation::Organisation;
pub use user::{CourseToken, TokenType, User, UsersQuery};

use serde::Deserialize;

/// Pluvo API version information.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// The version string reported by the API.
    pub version: String,
}
