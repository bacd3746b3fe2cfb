//! SVG chart rendering for backtest results.
//!
//! Charts are plain SVG strings; the CLI writes them to disk.

use std::fmt::Write as _;

use crate::domain::execution::{Trade, TradeAction};
use crate::domain::metrics::PerformanceSummary;
use crate::domain::moving_average::MovingAverageSeries;
use crate::domain::portfolio::ValuePoint;
use crate::domain::price::PricePoint;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 420.0;
const PADDING: f64 = 50.0;

const CLOSE_COLOR: &str = "#1f77b4";
const SHORT_COLOR: &str = "#ff7f0e";
const LONG_COLOR: &str = "#d62728";
const BUY_COLOR: &str = "#2ca02c";
const SELL_COLOR: &str = "#d62728";

/// Maps series indices and values onto the plot area.
struct Scale {
    min: f64,
    max: f64,
    count: usize,
}

impl Scale {
    fn new(values: impl Iterator<Item = f64>, count: usize) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Self { min, max, count }
    }

    fn plot_width() -> f64 {
        WIDTH - 2.0 * PADDING
    }

    fn plot_height() -> f64 {
        HEIGHT - 2.0 * PADDING
    }

    fn x(&self, index: usize) -> f64 {
        if self.count > 1 {
            PADDING + index as f64 * Self::plot_width() / (self.count - 1) as f64
        } else {
            PADDING + Self::plot_width() / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            HEIGHT - PADDING - (value - self.min) * Self::plot_height() / range
        } else {
            HEIGHT / 2.0
        }
    }
}

fn open(out: &mut String, title: &str) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"<text x="{:.0}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        WIDTH / 2.0,
        PADDING / 2.0 + 6.0,
        escape(title)
    );
}

fn axes(out: &mut String) {
    let _ = writeln!(
        out,
        r#"<line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{b:.0}" stroke="black"/>"#,
        p = PADDING,
        b = HEIGHT - PADDING
    );
    let _ = writeln!(
        out,
        r#"<line x1="{p:.0}" y1="{b:.0}" x2="{r:.0}" y2="{b:.0}" stroke="black"/>"#,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING
    );
}

fn y_labels(out: &mut String, scale: &Scale) {
    for value in [scale.min, scale.max] {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="11">{:.2}</text>"#,
            PADDING - 4.0,
            scale.y(value) + 4.0,
            value
        );
    }
}

fn x_labels(out: &mut String, scale: &Scale, first: &str, last: &str) {
    let y = HEIGHT - PADDING + 16.0;
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{y:.1}" text-anchor="start" font-family="sans-serif" font-size="11">{first}</text>"#,
        scale.x(0)
    );
    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{y:.1}" text-anchor="end" font-family="sans-serif" font-size="11">{last}</text>"#,
        scale.x(scale.count.saturating_sub(1))
    );
}

fn polyline(out: &mut String, points: &[(f64, f64)], color: &str) {
    if points.is_empty() {
        return;
    }
    let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    let _ = writeln!(
        out,
        r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points="{}"/>"#,
        coords.join(" ")
    );
}

fn legend(out: &mut String, entries: &[(&str, &str)]) {
    for (i, (label, color)) in entries.iter().enumerate() {
        let x = PADDING + 10.0 + i as f64 * 150.0;
        let y = PADDING + 12.0;
        let _ = writeln!(
            out,
            r#"<rect x="{x:.0}" y="{:.0}" width="12" height="12" fill="{color}"/>"#,
            y - 10.0
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.0}" y="{y:.0}" font-family="sans-serif" font-size="12">{}</text>"#,
            x + 16.0,
            escape(label)
        );
    }
}

fn close(out: &mut String) {
    out.push_str("</svg>\n");
}

fn empty_chart(title: &str) -> String {
    let mut out = String::new();
    open(&mut out, title);
    let _ = writeln!(
        out,
        r#"<text x="{:.0}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="14">No data available.</text>"#,
        WIDTH / 2.0,
        HEIGHT / 2.0
    );
    close(&mut out);
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn average_line(scale: &Scale, series: &MovingAverageSeries) -> Vec<(f64, f64)> {
    series
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.value.map(|v| (scale.x(i), scale.y(v))))
        .collect()
}

/// Closes with both averages overlaid and a marker per trade: an upward
/// triangle for buys, a downward triangle for sells.
pub fn price_signal_svg(
    prices: &[PricePoint],
    short_ma: &MovingAverageSeries,
    long_ma: &MovingAverageSeries,
    trades: &[Trade],
) -> String {
    let title = "Price and Moving Averages";
    let (Some(first), Some(last)) = (prices.first(), prices.last()) else {
        return empty_chart(title);
    };

    let averages = short_ma
        .values
        .iter()
        .chain(long_ma.values.iter())
        .filter_map(|p| p.value);
    let scale = Scale::new(prices.iter().map(|p| p.close).chain(averages), prices.len());

    let mut out = String::new();
    open(&mut out, title);
    axes(&mut out);
    y_labels(&mut out, &scale);
    x_labels(&mut out, &scale, &first.date.to_string(), &last.date.to_string());

    let closes: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| (scale.x(i), scale.y(p.close)))
        .collect();
    polyline(&mut out, &closes, CLOSE_COLOR);
    polyline(&mut out, &average_line(&scale, short_ma), SHORT_COLOR);
    polyline(&mut out, &average_line(&scale, long_ma), LONG_COLOR);

    for trade in trades {
        let Ok(index) = prices.binary_search_by_key(&trade.date, |p| p.date) else {
            continue;
        };
        let x = scale.x(index);
        let y = scale.y(trade.price);
        let (shape, color) = match trade.action {
            TradeAction::Buy => (
                format!("{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}", x, y + 4.0, x - 6.0, y + 14.0, x + 6.0, y + 14.0),
                BUY_COLOR,
            ),
            TradeAction::Sell => (
                format!("{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}", x, y - 4.0, x - 6.0, y - 14.0, x + 6.0, y - 14.0),
                SELL_COLOR,
            ),
        };
        let _ = writeln!(
            out,
            r#"<polygon class="{}" points="{shape}" fill="{color}"/>"#,
            trade.action.to_string().to_lowercase()
        );
    }

    let short_label = format!("MA {}", short_ma.window);
    let long_label = format!("MA {}", long_ma.window);
    legend(
        &mut out,
        &[
            ("Close", CLOSE_COLOR),
            (&short_label, SHORT_COLOR),
            (&long_label, LONG_COLOR),
        ],
    );
    close(&mut out);
    out
}

/// Portfolio value over time against a dashed initial-capital baseline.
pub fn portfolio_value_svg(values: &[ValuePoint], initial_capital: f64) -> String {
    let title = "Portfolio Value";
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return empty_chart(title);
    };

    let scale = Scale::new(
        values.iter().map(|p| p.value).chain(std::iter::once(initial_capital)),
        values.len(),
    );

    let mut out = String::new();
    open(&mut out, title);
    axes(&mut out);
    y_labels(&mut out, &scale);
    x_labels(&mut out, &scale, &first.date.to_string(), &last.date.to_string());

    let baseline = scale.y(initial_capital);
    let _ = writeln!(
        out,
        r#"<line class="baseline" x1="{:.1}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="gray" stroke-dasharray="6,4"/>"#,
        PADDING,
        WIDTH - PADDING
    );

    let line: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, p)| (scale.x(i), scale.y(p.value)))
        .collect();
    polyline(&mut out, &line, CLOSE_COLOR);

    legend(&mut out, &[("Portfolio", CLOSE_COLOR), ("Initial capital", "gray")]);
    close(&mut out);
    out
}

/// One bar per summary, green for gains and red for losses.
pub fn returns_bar_svg(summaries: &[PerformanceSummary]) -> String {
    let title = "Strategy Returns";
    if summaries.is_empty() {
        return empty_chart(title);
    }

    // Zero always sits on the axis so bars grow from it.
    let scale = Scale::new(
        summaries.iter().map(|s| s.return_pct).chain(std::iter::once(0.0)),
        summaries.len(),
    );
    let zero = scale.y(0.0);
    let slot = Scale::plot_width() / summaries.len() as f64;
    let bar_width = slot * 0.6;

    let mut out = String::new();
    open(&mut out, title);
    axes(&mut out);
    y_labels(&mut out, &scale);
    let _ = writeln!(
        out,
        r#"<line x1="{:.1}" y1="{zero:.1}" x2="{:.1}" y2="{zero:.1}" stroke="black" stroke-width="0.5"/>"#,
        PADDING,
        WIDTH - PADDING
    );

    for (i, summary) in summaries.iter().enumerate() {
        let x = PADDING + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = scale.y(summary.return_pct);
        let (top, height) = if y < zero { (y, zero - y) } else { (zero, y - zero) };
        let color = if summary.return_pct >= 0.0 { BUY_COLOR } else { SELL_COLOR };
        let _ = writeln!(
            out,
            r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{color}"/>"#
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="11">{:+.2}%</text>"#,
            x + bar_width / 2.0,
            top - 4.0,
            summary.return_pct
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="11">{}</text>"#,
            x + bar_width / 2.0,
            HEIGHT - PADDING + 16.0,
            escape(&summary.name)
        );
    }

    close(&mut out);
    out
}
