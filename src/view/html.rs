//! Two-pane HTML dashboard rendered from a [`ViewModel`].

use std::fmt::Write;

use super::plot::{render_svg, PLOT_HEIGHT, PLOT_WIDTH};
use super::{escape_html, LedColor, ViewModel, CAPTION};
use crate::types::{AutoMode, SeverityOverride};

const PAGE_TITLE: &str = "SmartTrack Virtual Node";
const HEADING: &str = "SmartTrack — Virtual Hardware Node (Simulation Prototype)";

const STYLE: &str = "\
body{font-family:sans-serif;margin:1.5rem;color:#222}\
.layout{display:grid;grid-template-columns:1fr 2fr;gap:2rem}\
.leds{display:flex;gap:.75rem}\
.led{padding:.4rem .6rem;border-radius:.3rem;background:#f2f2f2}\
.led.on.green{background:#d4edda}.led.on.yellow{background:#fff3cd}.led.on.red{background:#f8d7da}\
.notice{background:#fff3cd;padding:.6rem;border-radius:.3rem}\
pre{background:#f6f8fa;padding:.75rem;border-radius:.3rem}\
.plot{display:block;margin-bottom:.5rem;max-width:100%}\
.caption{color:#666;font-size:.85rem}";

/// Query string that reproduces the current selectors without the trigger
/// pulse, used for the periodic auto-refresh.
pub fn refresh_query(view: &ViewModel) -> String {
    format!(
        "mode={}&override={}",
        view.controls.auto_mode.slug(),
        view.controls.severity_override.slug()
    )
}

/// Render the full page.
///
/// When periodic mode is selected and `auto_refresh_secs` is non-zero the
/// page reloads itself so the event window can be caught.
pub fn render_page(view: &ViewModel, auto_refresh_secs: u64) -> String {
    let mut head = String::new();
    let _ = write!(head, "<meta charset=\"utf-8\"><title>{PAGE_TITLE}</title>");
    if view.controls.auto_mode == AutoMode::Periodic && auto_refresh_secs > 0 {
        let _ = write!(
            head,
            "<meta http-equiv=\"refresh\" content=\"{auto_refresh_secs};url=/?{}\">",
            escape_html(&refresh_query(view))
        );
    }
    let _ = write!(head, "<style>{STYLE}</style>");

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head>{head}</head><body>\
         <h1>{HEADING}</h1><div class=\"layout\">\
         <section class=\"left\">{left}</section>\
         <section class=\"right\">{right}</section>\
         </div><p class=\"caption\">{caption}</p></body></html>",
        head = head,
        left = left_pane(view),
        right = right_pane(view),
        caption = escape_html(CAPTION),
    )
}

fn left_pane(view: &ViewModel) -> String {
    let node = &view.node;
    let mut out = String::new();

    out.push_str("<h3>Virtual Anchor Node</h3><ul class=\"node\">");
    for (label, value) in [
        ("Node ID", node.id.clone()),
        ("GPS", node.gps_display()),
        ("Edge CPU", node.edge_cpu.clone()),
        ("Power", node.power.clone()),
    ] {
        let _ = write!(out, "<li><strong>{label}:</strong> {}</li>", escape_html(&value));
    }
    out.push_str("</ul><hr>");

    out.push_str(&controls_form(view));
    out.push_str("<hr><h4>Device Status LEDs</h4><div class=\"leds\">");
    for color in LedColor::ALL {
        let on = if view.leds.is_on(color) { " on" } else { "" };
        let _ = write!(
            out,
            "<div class=\"led {}{on}\">{}</div>",
            color.name().to_ascii_lowercase(),
            escape_html(&view.leds.caption(color))
        );
    }
    out.push_str("</div><h4>Sensor Notes</h4><pre class=\"notes\">");
    out.push_str(&escape_html(&view.sensor_notes.join("\n")));
    out.push_str("</pre>");
    out
}

fn controls_form(view: &ViewModel) -> String {
    let mut out = String::from("<form method=\"get\" action=\"/\">");

    out.push_str("<label>Auto Mode <select name=\"mode\" onchange=\"this.form.submit()\">");
    for mode in AutoMode::ALL {
        let selected = if mode == view.controls.auto_mode { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{selected}>{}</option>",
            mode.slug(),
            escape_html(&mode.selector_label(view.periodic_window_secs))
        );
    }
    out.push_str("</select></label><br>");

    out.push_str(
        "<label>Force severity (optional) <select name=\"override\" onchange=\"this.form.submit()\">",
    );
    for option in SeverityOverride::OPTIONS {
        let selected = if option == view.controls.severity_override { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{selected}>{}</option>",
            option.slug(),
            escape_html(option.display_name())
        );
    }
    out.push_str("</select></label><br>");

    out.push_str("<button type=\"submit\" name=\"trigger\" value=\"true\">Trigger Crack Event</button>");
    out.push_str("</form>");
    out
}

fn right_pane(view: &ViewModel) -> String {
    let mut out = String::from("<h3>Sensor Waveforms &amp; On-Edge AI</h3>");
    for panel in &view.waveforms {
        out.push_str(&render_svg(&panel.waveform, PLOT_WIDTH, PLOT_HEIGHT));
    }
    out.push_str("<hr>");

    let c = &view.classification;
    let _ = write!(
        out,
        "<div class=\"classifier\"><h3>On-Edge Classifier</h3>\
         <p><strong>Prediction:</strong> {}</p>\
         <p><strong>Confidence:</strong> {:.2}</p>\
         <p class=\"reason\">Decision: {}</p><ul class=\"features\">",
        escape_html(c.label.display_name()),
        c.confidence,
        escape_html(view.decision.reason.description()),
    );
    for panel in &view.waveforms {
        let s = &panel.summary;
        let _ = write!(
            out,
            "<li>{}: peak {:.3} @ {:.3}s, rms {:.4}</li>",
            panel.waveform.kind.code(),
            s.peak_amplitude,
            s.peak_time,
            s.rms
        );
    }
    out.push_str("</ul></div>");

    let json = serde_json::to_string_pretty(&view.alert)
        .unwrap_or_else(|e| format!("alert payload unavailable: {e}"));
    let _ = write!(out, "<pre class=\"alert\">{}</pre>", escape_html(&json));

    if let Some(notice) = view.alert_notice {
        let _ = write!(out, "<div class=\"notice\">{}</div>", escape_html(notice));
    }
    out
}
