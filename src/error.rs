//! Fetch error types
//!
//! A failed load is reported as one [`FetchError`] naming the bucket whose
//! request failed first.

use thiserror::Error;

use crate::model::Bucket;

/// Why a single request failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestFailure {
    /// The request did not complete within the configured timeout
    #[error("request timeout")]
    Timeout,

    /// Could not connect to the analytics API
    #[error("analytics API unavailable: {0}")]
    Unavailable(String),

    /// Any other transport level failure
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RequestFailure {
    fn from(err: serde_json::Error) -> Self {
        RequestFailure::Decode(err.to_string())
    }
}

/// Failure of the five-way join, tagged with the failing endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Total Analytics request failed: {0}")]
    Total(RequestFailure),

    #[error("RedListed Analytics request failed: {0}")]
    RedListed(RequestFailure),

    #[error("UNListed Analytics request failed: {0}")]
    Unlisted(RequestFailure),

    #[error("approved count request failed: {0}")]
    Approved(RequestFailure),

    #[error("rejected count request failed: {0}")]
    Rejected(RequestFailure),

    /// The view was unmounted before the join resolved
    #[error("load cancelled")]
    Cancelled,
}

impl FetchError {
    /// Tag a request failure with the bucket it came from
    pub fn for_bucket(bucket: Bucket, failure: RequestFailure) -> Self {
        match bucket {
            Bucket::Total => FetchError::Total(failure),
            Bucket::RedListed => FetchError::RedListed(failure),
            Bucket::Unlisted => FetchError::Unlisted(failure),
            Bucket::Approved => FetchError::Approved(failure),
            Bucket::Rejected => FetchError::Rejected(failure),
        }
    }

    /// The bucket whose request failed, `None` for a cancelled load
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            FetchError::Total(_) => Some(Bucket::Total),
            FetchError::RedListed(_) => Some(Bucket::RedListed),
            FetchError::Unlisted(_) => Some(Bucket::Unlisted),
            FetchError::Approved(_) => Some(Bucket::Approved),
            FetchError::Rejected(_) => Some(Bucket::Rejected),
            FetchError::Cancelled => None,
        }
    }

    /// The underlying request failure, if any
    pub fn failure(&self) -> Option<&RequestFailure> {
        match self {
            FetchError::Total(f)
            | FetchError::RedListed(f)
            | FetchError::Unlisted(f)
            | FetchError::Approved(f)
            | FetchError::Rejected(f) => Some(f),
            FetchError::Cancelled => None,
        }
    }
}

/// Result type alias for a full load
pub type FetchResult<T> = Result<T, FetchError>;
