//! Inline SVG waveform plots
//!
//! A plot is a single polyline scaled into a fixed box with a title and no
//! tick marks, which is all the dashboard needs.

use std::fmt::Write;

use super::escape_html;
use crate::synthesis::Waveform;

pub const PLOT_WIDTH: u32 = 600;
pub const PLOT_HEIGHT: u32 = 160;

const TITLE_BAND: f64 = 22.0;
const MARGIN: f64 = 6.0;

/// Map the samples into SVG `points` coordinates.
///
/// The y range is symmetric around zero so a quiet channel stays
/// centred; it never shrinks below ±0.05 so noise does not fill the box.
pub fn polyline_points(times: &[f64], amplitudes: &[f64], width: u32, height: u32) -> String {
    let w = f64::from(width) - 2.0 * MARGIN;
    let h = f64::from(height) - TITLE_BAND - 2.0 * MARGIN;
    let y_mid = TITLE_BAND + MARGIN + h / 2.0;

    let (t_min, t_max) = times
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)));
    let t_span = if t_max > t_min { t_max - t_min } else { 1.0 };

    let y_extent = amplitudes
        .iter()
        .fold(0.05_f64, |acc, a| acc.max(a.abs()))
        * 1.1;

    let mut out = String::with_capacity(times.len() * 14);
    for (&t, &a) in times.iter().zip(amplitudes) {
        let x = MARGIN + (t - t_min) / t_span * w;
        let y = y_mid - a / y_extent * (h / 2.0);
        if !out.is_empty() {
            out.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{x:.1},{y:.1}");
    }
    out
}

/// Render one waveform as a standalone `<svg>` element.
pub fn render_svg(waveform: &Waveform, width: u32, height: u32) -> String {
    let points = polyline_points(&waveform.times, &waveform.amplitudes, width, height);
    let title = escape_html(&waveform.title());
    format!(
        concat!(
            r#"<svg class="plot" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" "#,
            r#"width="{w}" height="{h}" role="img" aria-label="{title}">"#,
            r#"<rect width="{w}" height="{h}" fill="white"/>"#,
            r#"<text x="{cx}" y="15" text-anchor="middle" font-size="12">{title}</text>"#,
            r##"<polyline fill="none" stroke="#1f77b4" stroke-width="1" points="{points}"/>"##,
            "</svg>"
        ),
        w = width,
        h = height,
        cx = width / 2,
        title = title,
        points = points,
    )
}
