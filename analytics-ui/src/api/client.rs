//! HTTP API Client
//!
//! Fetches the analytics buckets with `gloo-net` and joins them with the
//! shared fail-fast join.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use syntech_analytics::{
    join_buckets, Bucket, FetchResult, RawAnalytics, RawCounter, RawPoint, RequestFailure,
    SourceConfig, DEFAULT_BASE_URL,
};

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "syntech_analytics_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

async fn get_json<T: DeserializeOwned>(url: String) -> Result<T, RequestFailure> {
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| RequestFailure::Transport(e.to_string()))?;

    let status = response.status();
    let ok = response.ok();
    let body = response
        .text()
        .await
        .map_err(|e| RequestFailure::Transport(e.to_string()))?;

    if !ok {
        return Err(RequestFailure::Status { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}

async fn series(source: &SourceConfig, bucket: Bucket) -> Result<Vec<RawPoint>, RequestFailure> {
    get_json(source.url(bucket)).await
}

async fn counter(source: &SourceConfig, bucket: Bucket) -> Result<RawCounter, RequestFailure> {
    get_json(source.url(bucket)).await
}

/// Fetch all five buckets concurrently; the first failure wins
pub async fn fetch_analytics() -> FetchResult<RawAnalytics> {
    let source = SourceConfig::with_base_url(get_api_base());

    join_buckets(
        series(&source, Bucket::Total),
        series(&source, Bucket::RedListed),
        series(&source, Bucket::Unlisted),
        counter(&source, Bucket::Approved),
        counter(&source, Bucket::Rejected),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_default_api_base() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(API_URL_KEY);
        }
        assert_eq!(get_api_base(), DEFAULT_BASE_URL);
    }

    #[wasm_bindgen_test]
    fn test_api_base_override_is_normalized() {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .unwrap();
        storage.set_item(API_URL_KEY, "http://localhost:5000/").unwrap();
        assert_eq!(get_api_base(), "http://localhost:5000");
        storage.remove_item(API_URL_KEY).unwrap();
    }
}
