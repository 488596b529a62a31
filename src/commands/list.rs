use anyhow::Result;
use evdir_core::selection::FilterSelection;
use evdir_core::view::DirectoryView;
use owo_colors::OwoColorize;

use super::DirectoryContext;
use crate::render::{Render, render_access_chips, render_category_chips};

pub async fn run(ctx: &DirectoryContext, selection: FilterSelection, json: bool) -> Result<()> {
    let events = ctx.load_events().await?;
    let is_authenticated = ctx.session.is_authenticated();
    let view = DirectoryView::compose(&events, &selection, is_authenticated);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view, &selection, is_authenticated);
    Ok(())
}

pub fn print_view(view: &DirectoryView, selection: &FilterSelection, is_authenticated: bool) {
    println!("{}", view.totals.render());
    println!("{}", render_category_chips(&view.category_counts, &selection.category));
    println!(
        "{}",
        render_access_chips(&view.access_counts, selection.access, is_authenticated)
    );
    println!();

    if view.feed.is_empty() {
        println!("{}", "No events found.".dimmed());
        return;
    }

    println!("{}", format!("{} results", view.feed.len()).dimmed());
    for event in &view.feed {
        println!("{}", event.render());
    }
}
