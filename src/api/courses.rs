//! Courses service.

use std::sync::Arc;

use crate::client::paged::{ListMethod, PagedRequest};
use crate::client::ClientInner;
use crate::models::{Course, CourseSearch, CoursesQuery};
use crate::Result;

/// Service for course operations.
///
/// # Example
///
/// ```no_run
/// use pluvo_rs::models::CoursesQuery;
///
/// # async fn example(client: pluvo_rs::PluvoClient) -> pluvo_rs::Result<()> {
/// let query = CoursesQuery {
///     title: Some("rust".to_string()),
///     ..Default::default()
/// };
///
/// let mut courses = client.courses().list(Some(query)).build();
/// let mut iter = courses.iter();
/// while let Some(course) = iter.next().await {
///     println!("{}", course?.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CoursesService {
    inner: Arc<ClientInner>,
}

impl CoursesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a course by id.
    pub async fn get(&self, course_id: u64) -> Result<Course> {
        self.inner.get(&format!("course/{}/", course_id)).await
    }

    /// List courses matching the given filters.
    ///
    /// Returns a paged request; finish with
    /// [`build`](PagedRequest::build) to obtain the lazily-fetched
    /// collection.
    pub fn list(&self, query: Option<CoursesQuery>) -> PagedRequest<Course> {
        PagedRequest::new(self.inner.clone(), ListMethod::Get, "course/", query.as_ref())
    }

    /// Search courses with a filter body.
    ///
    /// Unlike [`list`](Self::list), the filters travel as a POST body, so
    /// arbitrarily large id lists are accepted.
    pub fn search(&self, search: &CourseSearch) -> PagedRequest<Course> {
        PagedRequest::new(
            self.inner.clone(),
            ListMethod::Post,
            "course/search/",
            Some(search),
        )
    }

    /// Create or update a course.
    ///
    /// A course with an `id` is updated in place; one without is created.
    pub async fn upsert(&self, course: &Course) -> Result<Course> {
        match course.id {
            Some(id) => self.inner.put(&format!("course/{}/", id), course).await,
            None => self.inner.post("course/", course).await,
        }
    }
}
