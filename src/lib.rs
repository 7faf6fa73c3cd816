//! # pluvo-rs
//!
//! An async Rust client for the Pluvo learning platform API.
//!
//! The crate covers the REST surface (courses, users, organisations,
//! media uploads) and presents every list endpoint as a
//! [`PagedCollection`]: a lazily-fetched, cacheable view that can be
//! indexed by absolute position, sliced, and iterated without thinking
//! about server-side paging.
//!
//! ## Features
//!
//! - **Authentication**: client pair (header) or token (query parameter)
//! - **Lazy pagination**: pages are fetched on demand and cached; negative
//!   indices, slices, and client-side offset/limit windows are supported
//! - **Typed models**: serde-backed models and query structs
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pluvo_rs::PluvoClient;
//!
//! #[tokio::main]
//! async fn main() -> pluvo_rs::Result<()> {
//!     let client = PluvoClient::builder().token("api-token").build()?;
//!
//!     let mut courses = client.courses().list(None).build();
//!     println!("{} courses", courses.len().await?);
//!
//!     // Negative indices count from the end
//!     let newest = courses.get(-1).await?;
//!     println!("newest course: {}", newest.title);
//!
//!     // Slices fetch only the pages they touch
//!     for course in courses.slice(Some(10), Some(20)).await? {
//!         println!("{}", course.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Iterating large collections
//!
//! ```rust,no_run
//! use pluvo_rs::models::UsersQuery;
//!
//! # async fn example(client: pluvo_rs::PluvoClient) -> pluvo_rs::Result<()> {
//! let query = UsersQuery {
//!     name: Some("smith".to_string()),
//!     ..Default::default()
//! };
//!
//! // Fetch at most 100 users, 25 per request
//! let mut users = client.users().list(Some(query)).page_size(25).limit(100).build();
//!
//! let mut iter = users.iter();
//! while let Some(user) = iter.next().await {
//!     println!("{}", user?.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use client::{
    ClientConfig, ListMethod, ListPage, PagedCollection, PagedIter, PagedRequest, PluvoClient,
    PluvoClientBuilder, RetryConfig, DEFAULT_API_URL, DEFAULT_PAGE_SIZE,
};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
///
/// ```rust
/// use pluvo_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::Credentials;
    pub use crate::client::{ClientConfig, PagedCollection, PluvoClient, RetryConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Course, CourseSearch, CourseToken, CoursesQuery, Organisation, TokenType, UploadToken,
        User, UsersQuery, Version,
    };
}
