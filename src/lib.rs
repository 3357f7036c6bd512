//! # Syntech Analytics
//!
//! Fetches the five Syntech analytics buckets concurrently and renders them
//! as a dashboard: approved/rejected counters plus Total, RedListed and
//! UnListed line charts.
//!
//! ## Modules
//!
//! - [`model`]: wire and view data types
//! - [`format`]: timestamp formatting for chart labels
//! - [`join`]: the fail-fast five-way join
//! - [`aggregate`]: responses → view snapshot
//! - [`state`]: the Loading/Loaded view state
//! - [`chart`]: chart specs and axis scaling
//! - [`render`]: terminal renderer
//! - [`client`] / [`view`] (feature `native`): reqwest fetcher and the
//!   mount/unmount controller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use syntech_analytics::{AnalyticsClient, AnalyticsView, DisplayZone, RenderOptions, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnalyticsClient::new(SourceConfig::default())?;
//!     let view = AnalyticsView::new(client, DisplayZone::Utc);
//!
//!     // Errors are logged and leave the view empty
//!     let _ = view.mount().await?;
//!
//!     let state = view.state().await;
//!     println!("{}", syntech_analytics::render_text(&state, &RenderOptions::default()));
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod join;
pub mod model;
pub mod render;
pub mod state;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod view;

// Re-export top-level types for convenience
pub use aggregate::{aggregate, reshape_series};
pub use chart::{ChartSpec, ValueScale};
pub use config::{
    generate_default_config, Config, ConfigError, DisplayConfig, EndpointsConfig, LoggingConfig,
    SourceConfig, DEFAULT_BASE_URL,
};
pub use error::{FetchError, FetchResult, RequestFailure};
pub use format::{format_timestamp, DisplayZone, INVALID_DATE};
pub use join::join_buckets;
pub use model::{
    AnalyticsSnapshot, Bucket, Count, CounterValue, RawAnalytics, RawCounter, RawPoint,
    TimeSeriesPoint,
};
pub use render::{render_chart, render_loading, render_text, RenderOptions};
pub use state::{ViewPhase, ViewState};

#[cfg(feature = "native")]
pub use client::{AnalyticsClient, AnalyticsSource};
#[cfg(feature = "native")]
pub use view::{AnalyticsView, StaticSource};
