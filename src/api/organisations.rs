//! Organisations service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::Organisation;
use crate::Result;

/// Service for organisation operations.
pub struct OrganisationsService {
    inner: Arc<ClientInner>,
}

impl OrganisationsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create or update an organisation.
    ///
    /// An organisation with an `id` is updated in place; one without is
    /// created.
    pub async fn upsert(&self, organisation: &Organisation) -> Result<Organisation> {
        match organisation.id {
            Some(id) => {
                self.inner
                    .put(&format!("organisation/{}/", id), organisation)
                    .await
            }
            None => self.inner.post("organisation/", organisation).await,
        }
    }
}
