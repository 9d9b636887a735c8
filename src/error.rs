use thiserror::Error;

/// The only two failure kinds the gateway itself produces. Everything the
/// remote service reports (non-2xx statuses, JSON error envelopes) flows
/// through as an ordinary [`crate::client::ApiResponse`] for the caller to
/// interpret.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session token set; detected before any network access happens.
    #[error("no API token set")]
    NoCredential,

    /// Connection error, timeout, or an unparseable response body.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// A workflow that hit a gateway error mid-sequence. Carries the name of the
/// step that failed so callers know exactly how far the sequence got.
#[derive(Debug, Error)]
#[error("workflow aborted at step '{step}': {source}")]
pub struct WorkflowError {
    pub step: &'static str,
    #[source]
    pub source: ApiError,
}

impl WorkflowError {
    pub fn at(step: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| Self { step, source }
    }
}
