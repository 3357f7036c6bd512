//! App Root Component

use leptos::*;
use leptos_router::*;

use crate::pages::Analytics;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Analytics />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div style="text-align: center">
                <h1>"Page Not Found"</h1>
                <A href="/">"Go to Analytics"</A>
            </div>
        </div>
    }
}
