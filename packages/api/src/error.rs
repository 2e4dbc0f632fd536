//! Transport errors.
//!
//! HTTP error statuses are not represented here: they arrive as a normal
//! [`ApiResponse`](crate::ApiResponse). An [`ApiError`] means no usable response
//! was received at all.

/// Failure to complete an HTTP exchange with the notes service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or no response headers arrived.
    #[error("could not reach {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// The response started but its body could not be read.
    #[error("response from {url} was interrupted: {reason}")]
    Interrupted { url: String, reason: String },
}

impl ApiError {
    pub fn url(&self) -> &str {
        match self {
            Self::Unreachable { url, .. } | Self::Interrupted { url, .. } => url,
        }
    }
}
