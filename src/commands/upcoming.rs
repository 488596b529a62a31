use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use evdir_core::selection::FilterSelection;
use evdir_core::view::DirectoryView;
use owo_colors::OwoColorize;

use super::DirectoryContext;
use crate::render::render_upcoming;

pub async fn run(ctx: &DirectoryContext, selection: FilterSelection, limit: usize) -> Result<()> {
    let events = ctx.load_events().await?;
    let view = DirectoryView::compose(&events, &selection, ctx.session.is_authenticated());
    let upcoming = view.upcoming(limit);

    if upcoming.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for event in upcoming {
        let date_label = format_date_label(event.start_time);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        println!("{}", render_upcoming(event));
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(millis: i64) -> String {
    let Some(date) = DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).date_naive())
    else {
        return "Unknown date".to_string();
    };

    day_label(date, Local::now().date_naive())
}

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
