//! View state
//!
//! The two-phase state behind the dashboard: `Loading` until the join
//! settles, then `Loaded` for the rest of the mount.

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::model::{AnalyticsSnapshot, Bucket, CounterValue, TimeSeriesPoint};

/// Render phase derived from [`ViewState::loading`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Loaded,
}

/// Everything the renderer needs.
///
/// While `loading` is set all series are empty and both counters are unset.
/// `loading` is cleared exactly once, either with a committed snapshot or
/// with the initial values left in place after a failed load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub loading: bool,
    pub total: Vec<TimeSeriesPoint>,
    pub red_listed: Vec<TimeSeriesPoint>,
    pub unlisted: Vec<TimeSeriesPoint>,
    pub approved: CounterValue,
    pub rejected: CounterValue,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            total: Vec::new(),
            red_listed: Vec::new(),
            unlisted: Vec::new(),
            approved: CounterValue::default(),
            rejected: CounterValue::default(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else {
            ViewPhase::Loaded
        }
    }

    /// Commit a successful load. Returns `false` if the state had already
    /// settled, in which case nothing changes.
    pub fn commit(&mut self, snapshot: AnalyticsSnapshot) -> bool {
        if !self.loading {
            return false;
        }
        self.total = snapshot.total;
        self.red_listed = snapshot.red_listed;
        self.unlisted = snapshot.unlisted;
        self.approved = snapshot.approved;
        self.rejected = snapshot.rejected;
        self.loading = false;
        true
    }

    /// Settle after a failed load, keeping the initial empty values
    pub fn fail(&mut self) -> bool {
        if !self.loading {
            return false;
        }
        self.loading = false;
        true
    }

    /// Settle with whichever outcome the load produced
    pub fn settle<E>(&mut self, outcome: Result<AnalyticsSnapshot, E>) -> bool {
        match outcome {
            Ok(snapshot) => self.commit(snapshot),
            Err(_) => self.fail(),
        }
    }

    /// The three charts in display order
    pub fn charts(&self) -> [ChartSpec<'_>; 3] {
        [
            ChartSpec::new(Bucket::Total, &self.total),
            ChartSpec::new(Bucket::RedListed, &self.red_listed),
            ChartSpec::new(Bucket::Unlisted, &self.unlisted),
        ]
    }

    pub fn approved_label(&self) -> String {
        format!("Approved Count: {}", self.approved)
    }

    pub fn rejected_label(&self) -> String {
        format!("Rejected Count: {}", self.rejected)
    }
}
