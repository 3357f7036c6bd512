//! Syntech Analytics Dashboard
//!
//! Browser rendition of the analytics view, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It fetches the five analytics buckets over HTTP and shares
//! the data model, date formatting, join and chart scaling with the
//! `syntech-analytics` crate.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
