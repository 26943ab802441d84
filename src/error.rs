use thiserror::Error;

/// Client-side failures: transport exhaustion, malformed store responses,
/// and construction problems.
///
/// Protocol-level rejections from the store (key not found, precondition
/// failed, ...) are not errors of this type; they arrive as a populated
/// [`crate::result::EtcdError`] inside an `Ok` result.
#[derive(Debug, Error)]
pub enum EtcdApiError {
    #[error("server list is empty")]
    NoServers,

    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),

    #[error("all {attempts} configured servers were unreachable (last error: {last_error:?})")]
    AllServersUnreachable {
        attempts: usize,
        last_error: Option<String>,
    },

    #[error("malformed store response: {detail}")]
    MalformedResponse { detail: String },

    #[error("watch is not supported by this client")]
    WatchUnsupported,
}

impl EtcdApiError {
    #[must_use]
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}
