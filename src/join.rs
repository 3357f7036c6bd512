//! Five-way fail-fast join
//!
//! Runtime agnostic so the native reqwest client and the WASM frontend
//! share the same all-or-nothing semantics.

use futures_util::future::{try_join5, TryFutureExt};
use std::future::Future;

use crate::error::{FetchError, FetchResult, RequestFailure};
use crate::model::{Bucket, RawAnalytics, RawCounter, RawPoint};

/// Drive all five bucket requests concurrently.
///
/// Resolves once every request succeeded, or with the first failure, tagged
/// with its bucket. The remaining requests are dropped on failure.
pub async fn join_buckets<T, R, U, A, J>(
    total: T,
    red_listed: R,
    unlisted: U,
    approved: A,
    rejected: J,
) -> FetchResult<RawAnalytics>
where
    T: Future<Output = Result<Vec<RawPoint>, RequestFailure>>,
    R: Future<Output = Result<Vec<RawPoint>, RequestFailure>>,
    U: Future<Output = Result<Vec<RawPoint>, RequestFailure>>,
    A: Future<Output = Result<RawCounter, RequestFailure>>,
    J: Future<Output = Result<RawCounter, RequestFailure>>,
{
    let (total, red_listed, unlisted, approved, rejected) = try_join5(
        total.map_err(|e| FetchError::for_bucket(Bucket::Total, e)),
        red_listed.map_err(|e| FetchError::for_bucket(Bucket::RedListed, e)),
        unlisted.map_err(|e| FetchError::for_bucket(Bucket::Unlisted, e)),
        approved.map_err(|e| FetchError::for_bucket(Bucket::Approved, e)),
        rejected.map_err(|e| FetchError::for_bucket(Bucket::Rejected, e)),
    )
    .await?;

    Ok(RawAnalytics {
        total,
        red_listed,
        unlisted,
        approved,
        rejected,
    })
}
