//! Users service.

use std::sync::Arc;

use crate::client::paged::{ListMethod, PagedRequest};
use crate::client::ClientInner;
use crate::models::{CourseToken, TokenType, User, UsersQuery};
use crate::Result;

/// Service for user operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: pluvo_rs::PluvoClient) -> pluvo_rs::Result<()> {
/// let user = client.users().get(42).await?;
/// println!("{}", user.name);
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a user by id.
    pub async fn get(&self, user_id: u64) -> Result<User> {
        self.inner.get(&format!("user/{}/", user_id)).await
    }

    /// List users matching the given filters.
    pub fn list(&self, query: Option<UsersQuery>) -> PagedRequest<User> {
        PagedRequest::new(self.inner.clone(), ListMethod::Get, "user/", query.as_ref())
    }

    /// Create or update a user.
    ///
    /// A user with an `id` is updated in place; one without is created.
    pub async fn upsert(&self, user: &User) -> Result<User> {
        match user.id {
            Some(id) => self.inner.put(&format!("user/{}/", id), user).await,
            None => self.inner.post("user/", user).await,
        }
    }

    /// Get a token granting a user access to a course.
    pub async fn course_token(
        &self,
        user_id: u64,
        course_id: u64,
        token_type: TokenType,
    ) -> Result<CourseToken> {
        self.inner
            .get(&format!(
                "user/{}/course/{}/token/{}/",
                user_id, course_id, token_type
            ))
            .await
    }
}
