//! UI Components
//!
//! Reusable Leptos components for the analytics view.

pub mod chart;
pub mod counter;
pub mod loading;

pub use chart::LineChart;
pub use counter::CounterLabel;
pub use loading::Loading;
