//! Media upload types.

use serde::Deserialize;

/// A pre-signed S3 upload token.
///
/// Upload the file directly to `url`, presenting `token`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadToken {
    /// The upload target URL.
    pub url: String,
    /// The upload authorization token.
    pub token: String,
}
