//! Analytics Page
//!
//! Loads the five analytics buckets once on mount, then shows the counters
//! and the three line charts. Failures are logged to the console only.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use syntech_analytics::{aggregate, DisplayZone, FetchError, FetchResult, RawAnalytics, ViewState};

use crate::api;
use crate::components::counter::Side;
use crate::components::{CounterLabel, LineChart, Loading};

/// Analytics page component
#[component]
pub fn Analytics() -> impl IntoView {
    let state = create_rw_signal(ViewState::new());

    // Cleared on unmount; a late result is then dropped instead of
    // written into disposed signals.
    let mounted = Rc::new(Cell::new(true));
    {
        let mounted = Rc::clone(&mounted);
        on_cleanup(move || mounted.set(false));
    }

    spawn_local(async move {
        let outcome = api::fetch_analytics().await;
        apply_outcome(state, &mounted, outcome);
    });

    move || {
        if state.with(|s| s.loading) {
            view! { <Loading /> }.into_view()
        } else {
            view! { <Dashboard state=state.get() /> }.into_view()
        }
    }
}

/// Settle the page with a finished load. Returns `false` when the result was
/// dropped: the page is gone or the state had already settled.
fn apply_outcome(
    state: RwSignal<ViewState>,
    mounted: &Cell<bool>,
    outcome: FetchResult<RawAnalytics>,
) -> bool {
    if !mounted.get() {
        web_sys::console::debug_1(&"Analytics view unmounted before load settled".into());
        return false;
    }

    let outcome = outcome.map(|raw| aggregate(&raw, DisplayZone::Local));
    if let Err(e) = &outcome {
        log_failure(e);
    }
    state.try_update(|s| s.settle(outcome)).unwrap_or(false)
}

fn log_failure(err: &FetchError) {
    web_sys::console::error_1(&format!("Error fetching data: {}", err).into());
}

/// Loaded view: counters, heading and the three charts
#[component]
fn Dashboard(state: ViewState) -> impl IntoView {
    let charts = state
        .charts()
        .iter()
        .map(|chart| {
            view! {
                <LineChart
                    title=chart.title()
                    stroke=chart.stroke
                    points=chart.points.to_vec()
                />
            }
        })
        .collect_view();

    view! {
        <div class="analytics">
            <div class="counters">
                <CounterLabel text=state.approved_label() side=Side::Left />
                <CounterLabel text=state.rejected_label() side=Side::Right />
            </div>

            <h4 class="heading">"Analytics Data"</h4>

            <div class="chart-grid">
                {charts}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntech_analytics::{RawCounter, RawPoint, RequestFailure};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample() -> RawAnalytics {
        RawAnalytics {
            total: vec![RawPoint::new("2024-01-01T10:00:00Z", 5.0)],
            red_listed: vec![],
            unlisted: vec![],
            approved: RawCounter::new(42.0),
            rejected: RawCounter::new(3.0),
        }
    }

    #[wasm_bindgen_test]
    fn test_success_commits_once() {
        let runtime = create_runtime();
        let state = create_rw_signal(ViewState::new());
        let mounted = Cell::new(true);

        assert!(apply_outcome(state, &mounted, Ok(sample())));
        state.with(|s| {
            assert!(!s.loading);
            assert_eq!(s.total.len(), 1);
            assert_eq!(s.approved_label(), "Approved Count: 42");
        });

        let err = FetchError::Total(RequestFailure::Timeout);
        assert!(!apply_outcome(state, &mounted, Err(err)));
        assert_eq!(state.with(|s| s.total.len()), 1);

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_failure_settles_empty() {
        let runtime = create_runtime();
        let state = create_rw_signal(ViewState::new());
        let mounted = Cell::new(true);

        let err = FetchError::Rejected(RequestFailure::Unavailable("offline".to_string()));
        assert!(apply_outcome(state, &mounted, Err(err)));
        state.with(|s| {
            assert!(!s.loading);
            assert!(s.total.is_empty());
            assert_eq!(s.rejected_label(), "Rejected Count: ");
        });

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_result_after_unmount_is_dropped() {
        let runtime = create_runtime();
        let state = create_rw_signal(ViewState::new());
        let mounted = Cell::new(false);

        assert!(!apply_outcome(state, &mounted, Ok(sample())));
        assert!(state.with(|s| s.loading));

        runtime.dispose();
    }
}
