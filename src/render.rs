//! Non-interactive renderers for a built [`Timeline`].
//!
//! `table` is meant for a terminal or a pager; `json` is the machine-facing
//! form, an array of rows in display order each carrying `separator_before`.

use std::fmt::Write as _;

use labnotes_core::{Timeline, TimelineRow};

pub const EMPTY_MESSAGE: &str = "No notebook entries found.";
const SEPARATOR_LABEL: &str = " notebook entries ";
const RULE_WIDTH: usize = 78;

/// Render the timeline as a fixed-width text table.
///
/// Each entry is one line; further notes lines and the attachment list follow
/// it indented. A rule is printed where the separator falls.
pub fn render_table(timeline: &Timeline) -> String {
    if timeline.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:>8}  {:<6}  {:<20}  {:<12}  NOTES",
        "DATE", "TIME", "SOURCE", "AUTHOR", "SPECIMEN"
    );
    for row in timeline {
        if row.separator_before {
            out.push_str(&rule());
            out.push('\n');
        }
        write_row(&mut out, row);
    }
    out
}

/// Render the timeline as a pretty-printed JSON array.
pub fn render_json(timeline: &Timeline) -> serde_json::Result<String> {
    serde_json::to_string_pretty(timeline)
}

fn rule() -> String {
    let side = RULE_WIDTH.saturating_sub(SEPARATOR_LABEL.len()) / 2;
    format!("{}{SEPARATOR_LABEL}{}", "-".repeat(side), "-".repeat(side))
}

fn write_row(out: &mut String, row: &TimelineRow) {
    let entry = &row.entry;
    let mut notes = entry.notes.lines();
    let _ = writeln!(
        out,
        "{:<10}  {:>8}  {:<6}  {:<20}  {:<12}  {}",
        entry.created_date,
        entry.created_time,
        entry.origin.to_string(),
        entry.author_display_name,
        entry.specimen_number,
        notes.next().unwrap_or(""),
    );
    for line in notes {
        let _ = writeln!(out, "{:>66}{line}", "");
    }
    if !entry.attachments.is_empty() {
        let _ = writeln!(out, "{:>66}attachments: {}", "", entry.attachments.join(", "));
    }
}
