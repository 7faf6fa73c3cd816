//! HTTP client and paged collection layer for the Pluvo API.
//!
//! This module provides the main entry point [`PluvoClient`] plus the
//! [`paged`] submodule with the lazily-fetched collection type returned by
//! list endpoints.
//!
//! # Example
//!
//! ```no_run
//! use pluvo_rs::PluvoClient;
//!
//! # async fn example() -> pluvo_rs::Result<()> {
//! let client = PluvoClient::builder().token("api-token").build()?;
//!
//! let course = client.courses().get(42).await?;
//! println!("{}", course.title);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paged;

pub use config::{ClientConfig, RetryConfig, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
pub use http::{PluvoClient, PluvoClientBuilder};
pub use paged::{ListMethod, ListPage, PagedCollection, PagedIter, PagedRequest};
pub(crate) use http::ClientInner;
