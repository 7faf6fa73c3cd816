//! Media service.

use std::sync::Arc;

use serde::Serialize;

use crate::client::ClientInner;
use crate::models::UploadToken;
use crate::Result;

/// Service for media upload operations.
pub struct MediaService {
    inner: Arc<ClientInner>,
}

impl MediaService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a pre-signed S3 upload token for a file.
    pub async fn s3_upload_token(
        &self,
        filename: &str,
        media_type: &str,
    ) -> Result<UploadToken> {
        #[derive(Serialize)]
        struct Query<'a> {
            filename: &'a str,
            media_type: &'a str,
        }

        self.inner
            .get_with_query(
                "media/s3_upload_token/",
                &Query {
                    filename,
                    media_type,
                },
            )
            .await
    }
}
