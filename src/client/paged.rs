//! Lazily-fetched, indexable views over paginated list endpoints.
//!
//! List endpoints return results in server-side pages. [`PagedCollection`]
//! presents one logical list query as a single sequence: indexable by
//! absolute position (negative indices count from the end), sliceable, and
//! iterable, fetching only the pages actually touched and never re-fetching
//! a page already cached.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::http::{to_query_map, ClientInner};
use crate::{Error, Result};

/// Wire shape of a Pluvo list response.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ListPage<T> {
    /// Total number of items the server reports for the whole query.
    pub count: u64,
    /// The items in this page.
    pub data: Vec<T>,
}

/// Verb used to fetch pages of a list endpoint.
///
/// Most list endpoints take their filters in the query string; a few accept
/// filter sets too large for a URL and expect them in a JSON body instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    /// Filters and pagination parameters travel in the query string.
    Get,
    /// Filters and pagination parameters travel in a JSON body.
    Post,
}

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

type PageFetcher<T> =
    Box<dyn Fn(u64, u64) -> BoxFuture<'static, Result<ListPage<T>>> + Send + Sync>;

/// A lazily-fetched, cacheable, indexable view over a paginated endpoint.
///
/// Construction performs no network access; the first page is fetched on
/// the first observable operation (a length query, an index access, a slice
/// or iteration). Fetched pages are cached for the lifetime of the
/// collection, so adjacent accesses and slices spanning page boundaries do
/// not repeat round trips. The server total is learned opportunistically
/// from whichever page is fetched first.
///
/// Operations take `&mut self`: a collection is a single-use, short-lived
/// view driven from one logical thread of control, not a shared cache.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: pluvo_rs::PluvoClient) -> pluvo_rs::Result<()> {
/// let mut courses = client.courses().list(None).build();
///
/// println!("{} courses", courses.len().await?);
/// let newest = courses.get(-1).await?;
/// let first_ten = courses.slice(None, Some(10)).await?;
///
/// let mut iter = courses.iter();
/// while let Some(course) = iter.next().await {
///     println!("{}", course?.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PagedCollection<T> {
    /// Fetches one page: `(offset, limit) -> {count, data}`.
    fetch: PageFetcher<T>,
    page_size: u64,
    /// Client-supplied window narrowing the view below the server total.
    window_offset: u64,
    window_limit: Option<u64>,
    /// Server-reported total; set once from the first fetched page.
    server_count: Option<u64>,
    /// Cache of fetched pages, keyed by zero-based page index. Append-only.
    pages: HashMap<u64, Vec<T>>,
}

impl<T: Clone> PagedCollection<T> {
    /// Create a collection over an injected page fetcher.
    ///
    /// The fetcher receives the absolute item offset and the number of
    /// items to request, and resolves to the page plus the server's total
    /// count for the query. A `page_size` below 1 is clamped to 1.
    pub fn new<F>(fetch: F, page_size: u64) -> Self
    where
        F: Fn(u64, u64) -> BoxFuture<'static, Result<ListPage<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            page_size: page_size.max(1),
            window_offset: 0,
            window_limit: None,
            server_count: None,
            pages: HashMap::new(),
        }
    }

    /// Restrict the collection to a client-supplied `(offset, limit)`
    /// window on top of server paging.
    ///
    /// With a window, indexing is relative to `offset`, iteration stops
    /// after `limit` items regardless of the server total, and the final
    /// page request is shrunk so the last fetch asks for exactly the
    /// remaining items.
    pub fn with_window(mut self, offset: u64, limit: Option<u64>) -> Self {
        self.window_offset = offset;
        self.window_limit = limit;
        self
    }

    /// The number of items visible through this collection.
    ///
    /// Unknown until the first page has been fetched; at most one network
    /// access is ever incurred for length discovery, no matter how many
    /// times the length is queried.
    pub async fn len(&mut self) -> Result<u64> {
        if self.window_limit == Some(0) {
            return Ok(0);
        }
        if self.server_count.is_none() {
            self.page(0).await?;
        }
        Ok(self.effective_len())
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get the item at `index`.
    ///
    /// Negative indices count from the end (`-1` is the last item). Fetches
    /// at most one page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the resolved position falls
    /// outside `[0, len)`.
    pub async fn get(&mut self, index: i64) -> Result<T> {
        let len = self.len().await?;
        let position =
            resolve_index(index, len).ok_or(Error::IndexOutOfRange { index, len })?;
        match self.item_at(position).await? {
            Some(item) => Ok(item),
            None => Err(Error::IndexOutOfRange { index, len }),
        }
    }

    /// Copy out the items in `[start, stop)`.
    ///
    /// `None` bounds default to the start and end of the collection. Both
    /// bounds accept negative values, resolved independently against the
    /// length, then clamped to `[0, len]`. A `start` at or past `stop`
    /// yields an empty vector without error. Only the pages overlapping the
    /// range are fetched, each at most once; a `stop` falling exactly on a
    /// page start does not fetch the following page.
    pub async fn slice(&mut self, start: Option<i64>, stop: Option<i64>) -> Result<Vec<T>> {
        let len = self.len().await?;
        let start = clamp_bound(start.unwrap_or(0), len);
        let stop = match stop {
            Some(stop) => clamp_bound(stop, len),
            None => len,
        };
        if start >= stop {
            return Ok(Vec::new());
        }

        let first_page = start / self.page_size;
        let first_off = (start % self.page_size) as usize;
        let last_page = stop / self.page_size;
        let last_off = (stop % self.page_size) as usize;

        let mut items = Vec::with_capacity((stop - start) as usize);
        if first_page == last_page {
            let page = self.page(first_page).await?;
            let end = last_off.min(page.len());
            items.extend(page[first_off.min(end)..end].iter().cloned());
        } else {
            let page = self.page(first_page).await?;
            items.extend(page[first_off.min(page.len())..].iter().cloned());
            for index in first_page + 1..last_page {
                items.extend(self.page(index).await?.iter().cloned());
            }
            if last_off > 0 {
                let page = self.page(last_page).await?;
                items.extend(page[..last_off.min(page.len())].iter().cloned());
            }
        }
        Ok(items)
    }

    /// Iterate over all items in ascending order.
    ///
    /// Pages are fetched lazily, just before their first item is yielded.
    /// The iterator is one-shot; calling `iter()` again re-walks the range
    /// from the start, reusing cached pages.
    pub fn iter(&mut self) -> PagedIter<'_, T> {
        PagedIter {
            collection: self,
            position: 0,
            done: false,
        }
    }

    /// Copy out every item in the collection.
    pub async fn to_vec(&mut self) -> Result<Vec<T>> {
        self.iter().collect().await
    }

    /// Convert the collection into an owned [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send
    where
        T: Send + 'static,
    {
        futures_util::stream::try_unfold((self, 0u64), |(mut collection, position)| async move {
            match collection.item_at(position).await? {
                Some(item) => Ok(Some((item, (collection, position + 1)))),
                None => Ok(None),
            }
        })
    }

    /// The item at an absolute in-window position, or `None` past the end.
    ///
    /// `None` is also returned when the server hands back a page shorter
    /// than its reported total implies; iteration treats that as the end of
    /// the data.
    async fn item_at(&mut self, position: u64) -> Result<Option<T>> {
        if position >= self.len().await? {
            return Ok(None);
        }
        let in_page = (position % self.page_size) as usize;
        let page = self.page(position / self.page_size).await?;
        Ok(page.get(in_page).cloned())
    }

    /// Fetch and cache the page at `index`. A cached page is returned
    /// without a transport call.
    async fn page(&mut self, index: u64) -> Result<&[T]> {
        if !self.pages.contains_key(&index) {
            let offset = self.window_offset + index * self.page_size;
            let limit = match self.window_limit {
                Some(limit) => self.page_size.min(limit.saturating_sub(index * self.page_size)),
                None => self.page_size,
            };
            tracing::trace!(page = index, offset, limit, "fetching page");
            let page = (self.fetch)(offset, limit).await?;
            if self.server_count.is_none() {
                self.server_count = Some(page.count);
            }
            self.pages.insert(index, page.data);
        }
        Ok(&self.pages[&index])
    }

    fn effective_len(&self) -> u64 {
        let remaining = self
            .server_count
            .unwrap_or(0)
            .saturating_sub(self.window_offset);
        match self.window_limit {
            Some(limit) => remaining.min(limit),
            None => remaining,
        }
    }
}

impl<T> std::fmt::Debug for PagedCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollection")
            .field("page_size", &self.page_size)
            .field("window_offset", &self.window_offset)
            .field("window_limit", &self.window_limit)
            .field("server_count", &self.server_count)
            .field("cached_pages", &self.pages.len())
            .finish()
    }
}

/// Resolve a possibly-negative index against `len`, Python style.
fn resolve_index(index: i64, len: u64) -> Option<u64> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved >= 0 && (resolved as u64) < len {
        Some(resolved as u64)
    } else {
        None
    }
}

/// Resolve a slice bound against `len` and clamp it into `[0, len]`.
fn clamp_bound(bound: i64, len: u64) -> u64 {
    let resolved = if bound < 0 { bound + len as i64 } else { bound };
    resolved.clamp(0, len as i64) as u64
}

/// Lazy iterator over a [`PagedCollection`].
///
/// Yields items in ascending index order, fetching each page just before
/// its first item. A fetch error ends the iteration after being yielded.
pub struct PagedIter<'a, T> {
    collection: &'a mut PagedCollection<T>,
    position: u64,
    done: bool,
}

impl<T: Clone> PagedIter<'_, T> {
    /// Yield the next item, fetching its page if needed.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if self.done {
            return None;
        }
        match self.collection.item_at(self.position).await {
            Ok(Some(item)) => {
                self.position += 1;
                Some(Ok(item))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    /// Drain the iterator into a vector, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

/// Builder for paged list requests.
///
/// Returned by the list methods of the per-resource services; finish with
/// [`build`](PagedRequest::build) to obtain the collection. Pagination of
/// the underlying requests is handled by the collection itself.
pub struct PagedRequest<T> {
    inner: Arc<ClientInner>,
    method: ListMethod,
    endpoint: String,
    /// Filter parameters, flattened up front. A serialization failure is
    /// carried here and surfaces on the first fetch.
    params: std::result::Result<Map<String, Value>, String>,
    page_size: Option<u64>,
    offset: u64,
    limit: Option<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned + Clone + Send + 'static> PagedRequest<T> {
    pub(crate) fn new<Q: Serialize>(
        inner: Arc<ClientInner>,
        method: ListMethod,
        endpoint: impl Into<String>,
        query: Option<&Q>,
    ) -> Self {
        let params = match query {
            Some(query) => to_query_map(query).map_err(|err| err.to_string()),
            None => Ok(Map::new()),
        };
        Self {
            inner,
            method,
            endpoint: endpoint.into(),
            params,
            page_size: None,
            offset: 0,
            limit: None,
            _marker: PhantomData,
        }
    }

    /// Override the page size inherited from the client configuration.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Skip the first `offset` items of the server result set.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Cap the collection at `limit` items, regardless of the server total.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the collection. No network access happens until it is used.
    pub fn build(self) -> PagedCollection<T> {
        let PagedRequest {
            inner,
            method,
            endpoint,
            params,
            page_size,
            offset,
            limit,
            ..
        } = self;
        let page_size = page_size.unwrap_or(inner.config.page_size);

        let fetch = move |page_offset: u64, page_limit: u64| -> BoxFuture<'static, Result<ListPage<T>>> {
            let inner = inner.clone();
            let endpoint = endpoint.clone();
            let params = params.clone();
            Box::pin(async move {
                let mut params = params.map_err(Error::Config)?;
                params.insert("offset".to_string(), page_offset.into());
                params.insert("limit".to_string(), page_limit.into());
                match method {
                    ListMethod::Get => inner.get_with_params(&endpoint, &params).await,
                    ListMethod::Post => inner.post(&endpoint, &params).await,
                }
            })
        };

        PagedCollection::new(fetch, page_size).with_window(offset, limit)
    }
}
