//! API access

pub mod client;

pub use client::{fetch_analytics, get_api_base};
