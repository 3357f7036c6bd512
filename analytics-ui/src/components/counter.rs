//! Counter Label Component

use leptos::*;

/// Which side of the counter row a label sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A scalar counter rendered as a heading, e.g. "Approved Count: 42"
#[component]
pub fn CounterLabel(
    /// Full label text
    #[prop(into)]
    text: String,
    /// Alignment within the counter row
    side: Side,
) -> impl IntoView {
    let style = match side {
        Side::Left => "margin-left: 20px",
        Side::Right => "margin-right: 20px",
    };

    view! {
        <h6 class="counter" style=style>{text}</h6>
    }
}
