//! Line Chart Component
//!
//! One time series drawn on an HTML5 Canvas: dashed Cartesian grid, count
//! and date axes, the coloured line and a hover tooltip.

use leptos::*;
use syntech_analytics::chart::{nearest_index, x_position, ValueScale};
use syntech_analytics::model::format_count;
use syntech_analytics::TimeSeriesPoint;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const CANVAS_WIDTH: u32 = 600;
const CANVAS_HEIGHT: u32 = 300;

// Margins
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Most date labels drawn under the x axis
const MAX_X_LABELS: usize = 4;

const GRID_COLOR: &str = "#cccccc";
const AXIS_COLOR: &str = "#666666";

/// Line chart for a single series
#[component]
pub fn LineChart(
    /// Heading shown above the chart
    title: &'static str,
    /// Line colour
    stroke: &'static str,
    /// Points in API order
    points: Vec<TimeSeriesPoint>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let hovered = create_rw_signal(None::<usize>);
    let points = store_value(points);

    // Redraw when the canvas mounts or the hovered point changes
    create_effect(move |_| {
        let active = hovered.get();
        if let Some(canvas) = canvas_ref.get() {
            points.with_value(|pts| draw_line_chart(&canvas, pts, stroke, active));
        }
    });

    let on_move = move |ev: ev::MouseEvent| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let scale_x = canvas.width() as f64 / canvas.client_width().max(1) as f64;
        let x = ev.offset_x() as f64 * scale_x - MARGIN_LEFT;
        let plot_width = canvas.width() as f64 - MARGIN_LEFT - MARGIN_RIGHT;
        let len = points.with_value(|p| p.len());
        hovered.set(nearest_index(x, len, plot_width));
    };

    let tooltip = move || {
        let point = hovered
            .get()
            .and_then(|idx| points.with_value(|p| p.get(idx).cloned()))?;
        let count = point.count.as_ref().map(ToString::to_string).unwrap_or_default();

        Some(view! {
            <div class="chart-tooltip">
                <p>{point.date}</p>
                <p style=format!("color: {}", stroke)>{format!("count : {}", count)}</p>
            </div>
        })
    };

    view! {
        <div class="chart-card">
            <h6 class="chart-title">{title}</h6>
            <div class="chart-frame">
                <canvas
                    node_ref=canvas_ref
                    width=CANVAS_WIDTH.to_string()
                    height=CANVAS_HEIGHT.to_string()
                    style="width: 100%; height: 300px;"
                    on:mousemove=on_move
                    on:mouseleave=move |_| hovered.set(None)
                />
                {tooltip}
            </div>
        </div>
    }
}

/// Draw the chart on canvas
fn draw_line_chart(
    canvas: &HtmlCanvasElement,
    points: &[TimeSeriesPoint],
    stroke: &str,
    active: Option<usize>,
) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.clear_rect(0.0, 0.0, width, height);

    let scale = ValueScale::fit(points);
    let x_of = |i: usize| MARGIN_LEFT + x_position(i, points.len(), chart_width);
    let y_of = |v: f64| MARGIN_TOP + scale.project(v, chart_height);

    // Dashed grid: one horizontal line per tick, one vertical per point
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0));
    let _ = ctx.set_line_dash(&dash);

    for tick in scale.ticks() {
        let y = y_of(tick);
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();
    }
    for i in 0..points.len() {
        let x = x_of(i);
        ctx.begin_path();
        ctx.move_to(x, MARGIN_TOP);
        ctx.line_to(x, MARGIN_TOP + chart_height);
        ctx.stroke();
    }
    let _ = ctx.set_line_dash(&js_sys::Array::new());

    // Axes
    ctx.set_stroke_style(&AXIS_COLOR.into());
    ctx.begin_path();
    ctx.move_to(MARGIN_LEFT, MARGIN_TOP);
    ctx.line_to(MARGIN_LEFT, MARGIN_TOP + chart_height);
    ctx.line_to(width - MARGIN_RIGHT, MARGIN_TOP + chart_height);
    ctx.stroke();

    // Y-axis labels
    ctx.set_fill_style(&AXIS_COLOR.into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("right");
    for tick in scale.ticks() {
        let _ = ctx.fill_text(&format_count(tick), MARGIN_LEFT - 8.0, y_of(tick) + 4.0);
    }

    if points.is_empty() {
        ctx.set_text_align("center");
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", MARGIN_LEFT + chart_width / 2.0, MARGIN_TOP + chart_height / 2.0);
        return;
    }

    // X-axis labels, thinned so they do not overlap
    ctx.set_text_align("center");
    let step = points.len().div_ceil(MAX_X_LABELS).max(1);
    for (i, point) in points.iter().enumerate().step_by(step) {
        let _ = ctx.fill_text(&point.date, x_of(i), height - MARGIN_BOTTOM / 2.0);
    }

    // Series line; a missing count breaks it
    ctx.set_stroke_style(&stroke.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    let mut pen_down = false;
    for (i, point) in points.iter().enumerate() {
        match point.value() {
            Some(value) => {
                if pen_down {
                    ctx.line_to(x_of(i), y_of(value));
                } else {
                    ctx.move_to(x_of(i), y_of(value));
                    pen_down = true;
                }
            }
            None => pen_down = false,
        }
    }
    ctx.stroke();

    // Dots, with the hovered one enlarged
    for (i, point) in points.iter().enumerate() {
        let Some(value) = point.value() else {
            continue;
        };
        let radius = if active == Some(i) { 8.0 } else { 3.0 };
        ctx.begin_path();
        let _ = ctx.arc(x_of(i), y_of(value), radius, 0.0, std::f64::consts::PI * 2.0);
        if active == Some(i) {
            ctx.set_fill_style(&stroke.into());
        } else {
            ctx.set_fill_style(&"#ffffff".into());
        }
        ctx.fill();
        ctx.stroke();
    }
}
