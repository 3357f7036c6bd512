//! Terminal renderer
//!
//! Draws the dashboard as text: a spinner while loading, otherwise the two
//! counter labels and three line charts on a dotted grid.

use crate::chart::{x_position, ChartSpec, ValueScale, GRID_INTERVALS};
use crate::model::format_count;
use crate::state::{ViewPhase, ViewState};

/// Braille spinner frames
pub const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const NO_DATA: &str = "No data";

/// Layout options for the text renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Plot width in cells, excluding the y-axis gutter
    pub width: usize,
    /// Plot height in rows
    pub height: usize,
    /// Paint lines with their stroke colour (24-bit ANSI)
    pub color: bool,
    /// List every point under its chart
    pub points: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 60,
            height: 10,
            color: false,
            points: false,
        }
    }
}

impl RenderOptions {
    fn plot_size(&self) -> (usize, usize) {
        (self.width.max(10), self.height.max(3))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Blank,
    Grid(char),
    Line,
    Dot,
    Text(char),
}

/// One spinner frame with its caption
pub fn render_loading(frame: usize) -> String {
    format!(
        "{} Loading analytics...",
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
    )
}

/// Render the whole view for its current phase
pub fn render_text(state: &ViewState, opts: &RenderOptions) -> String {
    match state.phase() {
        ViewPhase::Loading => render_loading(0),
        ViewPhase::Loaded => render_dashboard(state, opts),
    }
}

fn render_dashboard(state: &ViewState, opts: &RenderOptions) -> String {
    let charts = state.charts();
    let (width, _) = opts.plot_size();
    let full_width = charts
        .iter()
        .map(|c| gutter_width(&c.scale()) + 1 + width)
        .max()
        .unwrap_or(width);

    let mut out = String::new();
    out.push_str(&spread(&state.approved_label(), &state.rejected_label(), full_width));
    out.push_str("\n\n");
    out.push_str(&center("Analytics Data", full_width));
    out.push_str("\n\n");

    for chart in charts.iter() {
        out.push_str(&render_chart(chart, opts));
        out.push('\n');
    }

    out
}

/// Render one line chart with title, grid, axes and date labels
pub fn render_chart(chart: &ChartSpec<'_>, opts: &RenderOptions) -> String {
    let (width, height) = opts.plot_size();
    let scale = chart.scale();

    let labels: Vec<(usize, String)> = scale
        .ticks()
        .into_iter()
        .enumerate()
        .map(|(i, v)| (tick_offset(i, height), format_count(v)))
        .collect();
    let gutter = gutter_width(&scale);

    let mut grid = vec![vec![Cell::Blank; width]; height];
    draw_grid(&mut grid, &labels);

    if chart.is_empty() {
        overlay_text(&mut grid, NO_DATA);
    } else {
        plot(&mut grid, chart, &scale);
    }

    let mut out = String::new();
    out.push_str(&center(chart.title(), gutter + 1 + width));
    out.push('\n');

    for (row, cells) in grid.iter().enumerate() {
        match labels.iter().find(|(r, _)| *r == row) {
            Some((_, label)) => out.push_str(&format!("{:>gutter$}┤", label, gutter = gutter)),
            None => out.push_str(&format!("{:>gutter$}│", "", gutter = gutter)),
        }
        for cell in cells {
            out.push_str(&paint(*cell, chart.stroke, opts.color));
        }
        out.push('\n');
    }

    out.push_str(&" ".repeat(gutter));
    out.push('└');
    out.push_str(&"─".repeat(width));
    out.push('\n');

    let axis = x_labels(chart, width);
    if !axis.trim().is_empty() {
        out.push_str(&" ".repeat(gutter + 1));
        out.push_str(axis.trim_end());
        out.push('\n');
    }

    if opts.points {
        for point in chart.points {
            let count = point
                .count
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("  {}  {}\n", point.date, count));
        }
    }

    out
}

fn gutter_width(scale: &ValueScale) -> usize {
    scale
        .ticks()
        .into_iter()
        .map(|v| format_count(v).chars().count())
        .max()
        .unwrap_or(1)
}

/// Row (or column) of grid line `i` over `extent` cells
fn tick_offset(i: usize, extent: usize) -> usize {
    ((i as f64 / GRID_INTERVALS as f64) * (extent - 1) as f64).round() as usize
}

fn draw_grid(grid: &mut [Vec<Cell>], labels: &[(usize, String)]) {
    let width = grid.first().map(|r| r.len()).unwrap_or(0);
    if width == 0 {
        return;
    }

    for (row, _) in labels {
        for cell in grid[*row].iter_mut() {
            *cell = Cell::Grid('┈');
        }
    }

    for i in 0..=GRID_INTERVALS {
        let col = tick_offset(i, width);
        for row in grid.iter_mut() {
            row[col] = match row[col] {
                Cell::Grid('┈') => Cell::Grid('┼'),
                _ => Cell::Grid('┊'),
            };
        }
    }
}

fn plot(grid: &mut [Vec<Cell>], chart: &ChartSpec<'_>, scale: &ValueScale) {
    let height = grid.len();
    let width = grid.first().map(|r| r.len()).unwrap_or(0);
    let len = chart.points.len();

    let cell_of = |index: usize, value: f64| -> (usize, usize) {
        let x = x_position(index, len, (width - 1) as f64).round() as usize;
        let y = scale
            .project(value, (height - 1) as f64)
            .round()
            .clamp(0.0, (height - 1) as f64) as usize;
        (x.min(width - 1), y)
    };

    // Segments only join neighbouring points that both have a count
    for pair in chart.points.windows(2).enumerate() {
        let (i, window) = pair;
        let (Some(a), Some(b)) = (window[0].value(), window[1].value()) else {
            continue;
        };
        let (x0, y0) = cell_of(i, a);
        let (x1, y1) = cell_of(i + 1, b);

        let mut prev_row = y0;
        for col in x0..=x1 {
            let t = if x1 == x0 {
                1.0
            } else {
                (col - x0) as f64 / (x1 - x0) as f64
            };
            let row = (y0 as f64 + t * (y1 as f64 - y0 as f64)).round() as usize;
            let (lo, hi) = if prev_row <= row { (prev_row, row) } else { (row, prev_row) };
            for r in lo..=hi {
                grid[r][col] = Cell::Line;
            }
            prev_row = row;
        }
    }

    for (i, point) in chart.points.iter().enumerate() {
        if let Some(value) = point.value() {
            let (x, y) = cell_of(i, value);
            grid[y][x] = Cell::Dot;
        }
    }
}

fn overlay_text(grid: &mut [Vec<Cell>], text: &str) {
    let row = grid.len() / 2;
    let width = grid[row].len();
    let len = text.chars().count().min(width);
    let start = (width - len) / 2;
    for (offset, ch) in text.chars().take(len).enumerate() {
        grid[row][start + offset] = Cell::Text(ch);
    }
}

fn paint(cell: Cell, stroke: &str, color: bool) -> String {
    let ch = match cell {
        Cell::Blank => ' ',
        Cell::Grid(c) | Cell::Text(c) => c,
        Cell::Line => '•',
        Cell::Dot => '●',
    };

    match (cell, color, hex_rgb(stroke)) {
        (Cell::Line | Cell::Dot, true, Some((r, g, b))) => {
            format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, ch)
        }
        _ => ch.to_string(),
    }
}

/// Parse `#rrggbb`
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn x_labels(chart: &ChartSpec<'_>, width: usize) -> String {
    match chart.points {
        [] => String::new(),
        [only] => center(&only.date, width),
        [first, .., last] => {
            let used = first.date.chars().count() + last.date.chars().count();
            if used + 1 > width {
                first.date.clone()
            } else {
                format!("{}{}{}", first.date, " ".repeat(width - used), last.date)
            }
        }
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let pad = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(4);
    format!("{}{}{}", left, " ".repeat(gap), right)
}
