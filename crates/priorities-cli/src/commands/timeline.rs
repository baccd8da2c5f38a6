use priorities_core::models::TimelineEvent;
use priorities_core::timeline::{group_by_month, MonthSection};

use crate::commands::common::{load_fixtures, resolve_user};
use crate::error::CliError;

pub fn run_timeline(identifier: &str, as_json: bool) -> Result<(), CliError> {
    let fixtures = load_fixtures()?;
    let user = resolve_user(&fixtures, identifier)?;
    let months = group_by_month(fixtures.timeline_for(&user.unique_user_id));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&months)?);
    } else if months.is_empty() {
        println!("No moments with {} yet", user.first_name());
    } else {
        for line in format_timeline_lines(&months) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_timeline_lines(months: &[MonthSection]) -> Vec<String> {
    let mut lines = Vec::new();
    for month in months {
        lines.push(format!("{} ({})", month.label, month.event_count()));
        for day in &month.days {
            lines.push(format!("  {}", day.label));
            lines.extend(day.events.iter().map(format_event_line));
        }
    }
    lines
}

fn format_event_line(event: &TimelineEvent) -> String {
    format!(
        "    {}  {:<4}  {}",
        event.timestamp.format("%H:%M"),
        event.sender.label(),
        event.summary()
    )
}
