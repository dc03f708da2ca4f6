/// An upstream endpoint could not be reached, answered with a non-success
/// status, or sent a body that does not decode into the expected shape.
/// Request timeouts end up here as well.
#[derive(Debug, thiserror::Error)]
#[error("source unavailable: {url}")]
pub(crate) struct SourceUnavailable {
    pub(crate) url: String,
    #[source]
    pub(crate) source: Cause,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum Cause {
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),
}
