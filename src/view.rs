//! Analytics view controller
//!
//! Owns the single mount → load → unmount lifecycle of the dashboard. The
//! load races the join against the unmount token and only commits if the
//! view is still mounted.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::aggregate::aggregate;
use crate::client::AnalyticsSource;
use crate::error::{FetchError, FetchResult};
use crate::format::DisplayZone;
use crate::model::RawAnalytics;
use crate::state::ViewState;

/// The dashboard view: a source, the shared state and an unmount token
#[derive(Clone)]
pub struct AnalyticsView {
    source: Arc<dyn AnalyticsSource>,
    zone: DisplayZone,
    state: Arc<RwLock<ViewState>>,
    started: Arc<AtomicBool>,
    unmount: CancellationToken,
}

impl AnalyticsView {
    pub fn new(source: impl AnalyticsSource + 'static, zone: DisplayZone) -> Self {
        Self {
            source: Arc::new(source),
            zone,
            state: Arc::new(RwLock::new(ViewState::new())),
            started: Arc::new(AtomicBool::new(false)),
            unmount: CancellationToken::new(),
        }
    }

    /// Spawn the load for this mount
    pub fn mount(&self) -> JoinHandle<FetchResult<()>> {
        let view = self.clone();
        tokio::spawn(async move { view.load().await })
    }

    /// Cancel a pending load; its result will never reach the state
    pub fn unmount(&self) {
        self.unmount.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmount.is_cancelled()
    }

    /// Token cancelled on unmount, for callers wiring signal handlers
    pub fn unmount_token(&self) -> CancellationToken {
        self.unmount.clone()
    }

    /// Current state
    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Fetch, aggregate and commit.
    ///
    /// A failed load is logged and settles the view with empty values; the
    /// error is still returned to the caller. Only the first call fetches;
    /// later ones, concurrent or not, return immediately.
    pub async fn load(&self) -> FetchResult<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Load already started for this mount, not fetching again");
            return Ok(());
        }

        let span = tracing::info_span!("load", load_id = %Uuid::new_v4());
        self.load_inner().instrument(span).await
    }

    async fn load_inner(&self) -> FetchResult<()> {
        let started = Instant::now();
        tracing::info!("Fetching analytics");

        let outcome = tokio::select! {
            biased;
            _ = self.unmount.cancelled() => Err(FetchError::Cancelled),
            result = self.source.fetch_all() => result,
        };

        if self.unmount.is_cancelled() {
            tracing::debug!("View unmounted before the load settled, discarding result");
            return Err(FetchError::Cancelled);
        }

        let mut state = self.state.write().await;
        match outcome {
            Ok(raw) => {
                state.commit(aggregate(&raw, self.zone));
                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Analytics loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, bucket = ?e.bucket(), "Error fetching data");
                state.fail();
                Err(e)
            }
        }
    }
}

/// Serves a fixed result; used by tests and for replaying captured data
pub struct StaticSource {
    result: FetchResult<RawAnalytics>,
}

impl StaticSource {
    pub fn ok(raw: RawAnalytics) -> Self {
        Self { result: Ok(raw) }
    }

    pub fn err(err: FetchError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl AnalyticsSource for StaticSource {
    async fn fetch_all(&self) -> FetchResult<RawAnalytics> {
        self.result.clone()
    }
}
