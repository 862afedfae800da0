//! Attendance result rendering.
//!
//! The kiosk shows results on an HTML display surface; the CLI also prints
//! a plain-text form. Entries are rendered in the order the server sent
//! them, with no client-side sorting or filtering.

use std::fmt::Write as _;

use crate::client::AttendanceResult;

/// Render the result as an HTML fragment: heading, summary, then a table
/// with one row per attendance entry.
pub fn to_html(result: &AttendanceResult) -> String {
    let mut html = String::new();
    html.push_str("<h3>Attendance Results:</h3>\n");
    let _ = writeln!(html, "<p>Total faces detected: {}</p>", result.total_faces);
    let _ = writeln!(
        html,
        "<p>Students marked present: {}</p>",
        result.present_count
    );
    html.push_str("<table class=\"attendance-table\">\n");
    html.push_str("<thead><tr><th>Roll Number</th><th>Name</th><th>Status</th><th>Time</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for entry in &result.attendance {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&entry.roll),
            escape(&entry.name),
            escape(&entry.status),
            escape(&entry.time),
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Plain-text rendering for terminal output.
pub fn to_text(result: &AttendanceResult) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Total faces detected: {}", result.total_faces);
    let _ = writeln!(text, "Students marked present: {}", result.present_count);
    if result.attendance.is_empty() {
        text.push_str("(no attendance entries)\n");
        return text;
    }
    let _ = writeln!(text, "{:<12} {:<24} {:<10} {}", "ROLL", "NAME", "STATUS", "TIME");
    for entry in &result.attendance {
        let _ = writeln!(
            text,
            "{:<12} {:<24} {:<10} {}",
            entry.roll, entry.name, entry.status, entry.time
        );
    }
    text
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
