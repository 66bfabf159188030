use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path, Rectangle, Text, Title};

use crate::timer::Measurement;

pub const TITLE: &str = "wvm:// req for 1 KB calldata tx";
pub const X_LABEL: &str = "Request Number";
pub const Y_LABEL: &str = "Response Time (ms)";

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;

const BACKGROUND: &str = "#000000";
const FOREGROUND: &str = "#ffffff";
const SERIES: &str = "#FF8C00";
const GRID: &str = "gray";
const FONT: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// A linear axis with evenly spaced ticks every `step` units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    lo: f64,
    hi: f64,
    step: f64,
}

impl Axis {
    fn ticks(&self) -> Vec<f64> {
        let mut ticks = vec![];
        let mut t = (self.lo / self.step).ceil() * self.step;
        while t <= self.hi + self.step * 1e-9 {
            ticks.push(t);
            t += self.step;
        }
        ticks
    }

    /// Maps `v` into `[0, 1]` along the axis.
    fn unit(&self, v: f64) -> f64 {
        (v - self.lo) / (self.hi - self.lo)
    }
}

/// Rounds `range / target` up to 1, 2 or 5 times a power of ten.
fn nice_step(range: f64, target: usize) -> f64 {
    let raw = range / target as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Request indices with a small margin on each side. Ticks stay on whole requests.
fn x_axis(n: usize) -> Axis {
    let last = n.max(2) as f64;
    let step = nice_step(last - 1.0, 10).max(1.0).round();
    let pad = ((last - 1.0) * 0.05).max(0.5);
    Axis {
        lo: 1.0 - pad,
        hi: last + pad,
        step,
    }
}

/// Elapsed milliseconds from zero up to the first tick above the slowest request.
fn y_axis(max_ms: f64) -> Axis {
    let top = if max_ms > 0.0 { max_ms * 1.05 } else { 1.0 };
    let step = nice_step(top, 5);
    Axis {
        lo: 0.0,
        hi: (top / step).ceil() * step,
        step,
    }
}

fn format_tick(v: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{v:.0}")
    } else {
        let decimals = (-step.log10()).ceil() as usize;
        format!("{v:.decimals$}")
    }
}

fn label(content: impl Into<String>, x: f64, y: f64, size: f64) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("fill", FOREGROUND)
        .set("font-family", FONT)
        .set("font-size", size)
}

/// Renders response times as a dark-themed line chart with point markers.
pub fn render_chart(measurements: &[Measurement]) -> String {
    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;
    let right = MARGIN_LEFT + plot_w;

    let xa = x_axis(measurements.len());
    let ya = y_axis(measurements.iter().map(|m| m.elapsed_ms).fold(0.0, f64::max));
    let px = |x: f64| MARGIN_LEFT + xa.unit(x) * plot_w;
    let py = |y: f64| bottom - ya.unit(y) * plot_h;

    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", BACKGROUND),
        );

    // Grid and tick labels
    for t in xa.ticks() {
        let x = px(t);
        document = document
            .add(grid_line(x, MARGIN_TOP, x, bottom))
            .add(
                label(format_tick(t, xa.step), x, bottom + 20.0, 12.0)
                    .set("text-anchor", "middle"),
            );
    }
    for t in ya.ticks() {
        let y = py(t);
        document = document
            .add(grid_line(MARGIN_LEFT, y, right, y))
            .add(
                label(format_tick(t, ya.step), MARGIN_LEFT - 8.0, y + 4.0, 12.0)
                    .set("text-anchor", "end"),
            );
    }

    document = document.add(
        Rectangle::new()
            .set("x", MARGIN_LEFT)
            .set("y", MARGIN_TOP)
            .set("width", plot_w)
            .set("height", plot_h)
            .set("fill", "none")
            .set("stroke", FOREGROUND)
            .set("stroke-width", 1),
    );

    // Series
    let points = measurements
        .iter()
        .map(|m| (px(m.request as f64), py(m.elapsed_ms)))
        .collect::<Vec<_>>();
    if let Some((&first, rest)) = points.split_first() {
        let data = rest
            .iter()
            .fold(Data::new().move_to(first), |data, &p| data.line_to(p));
        document = document.add(
            Path::new()
                .set("fill", "none")
                .set("stroke", SERIES)
                .set("stroke-width", 2)
                .set("d", data),
        );
    }
    for (m, &(x, y)) in measurements.iter().zip(&points) {
        let circle = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", 4)
            .set("fill", SERIES)
            .add(Title::new(format!("#{}: {:.2} ms", m.request, m.elapsed_ms)));
        document = document.add(circle);
    }

    document = document
        .add(
            label(TITLE, width / 2.0, MARGIN_TOP / 2.0 + 6.0, 18.0).set("text-anchor", "middle"),
        )
        .add(
            label(X_LABEL, MARGIN_LEFT + plot_w / 2.0, height - 20.0, 14.0)
                .set("text-anchor", "middle"),
        );
    let (ylx, yly) = (24.0, MARGIN_TOP + plot_h / 2.0);
    document = document.add(
        label(Y_LABEL, ylx, yly, 14.0)
            .set("text-anchor", "middle")
            .set("transform", format!("rotate(-90 {ylx} {yly})")),
    );

    document.to_string()
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", GRID)
        .set("stroke-width", 1)
        .set("stroke-dasharray", "4 4")
}
