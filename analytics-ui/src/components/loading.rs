//! Loading Component

use leptos::*;

/// Full-viewport centred spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-spinner" role="progressbar" aria-label="Loading analytics" />
        </div>
    }
}
