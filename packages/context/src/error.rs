use thiserror::Error;

/// Lookup failures. Callers degrade these to an empty contribution.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} answered with status {status}")]
    Status {
        service: &'static str,
        status: String,
    },
    #[error("{0} api key is not configured")]
    MissingApiKey(&'static str),
    #[error("unexpected response from {service}: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },
}
