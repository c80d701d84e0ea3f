//! Rendering helpers for timeline and status output.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use keepsake_core::timeline::Milestone;
use keepsake_core::LockStatus;

#[derive(Clone, Copy)]
pub enum OutputFormat {
    Table,
    Plain,
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(anyhow::anyhow!(
            "Unsupported format: {} (use table or plain)",
            other
        )),
    }
}

/// Format seconds as `m:ss`, the countdown shape shown while locked.
pub fn format_mmss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn print_milestones_table(milestones: &[Milestone]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Title", "Location", "Kind", "Memory"]);
    for milestone in milestones {
        table.add_row(vec![
            milestone.date.to_string(),
            format!("{} {}", milestone.mood, milestone.title),
            milestone.location.clone(),
            milestone.kind.label().to_string(),
            milestone.content.clone(),
        ]);
    }
    println!("{table}");
}

pub fn print_milestones_plain(milestones: &[Milestone]) {
    for milestone in milestones {
        println!(
            "{} {} ({}) {}",
            milestone.date, milestone.title, milestone.location, milestone.content
        );
    }
}

pub fn milestones_json(milestones: &[Milestone]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(milestones).map_err(|e| anyhow::anyhow!("JSON error: {}", e))
}

pub fn print_lock_line(status: &LockStatus) {
    if status.locked {
        println!(
            "Lock:    {} ({} remaining)",
            "locked".red(),
            format_mmss(status.remaining_seconds)
        );
    } else {
        println!("Lock:    {}", "clear".green());
    }
}

pub fn print_session_line(active: bool) {
    if active {
        println!("Session: {}", "active".green());
    } else {
        println!("Session: {}", "none".yellow());
    }
}
