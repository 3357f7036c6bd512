//! Pages

pub mod analytics;

pub use analytics::Analytics;
