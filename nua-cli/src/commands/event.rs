use anyhow::Result;
use nua_core::event::EventForm;
use owo_colors::OwoColorize;

use crate::Context;
use crate::dates;
use crate::render::{self, Render};

pub fn add(
    ctx: &Context,
    kind: &str,
    date: &str,
    title: &str,
    description: Option<&str>,
) -> Result<()> {
    let date = dates::normalize_date(date)?;
    let mut tracker = ctx.tracker();

    let id = tracker.add_event(&EventForm {
        kind,
        date: &date,
        title,
        description,
    })?;

    if let Some(event) = tracker.session().events.get(&id) {
        println!("{}", "  Added:".green());
        println!("  {}", event.render());
        println!("           {}", id.dimmed());
    }
    Ok(())
}

pub fn remove(ctx: &Context, id: &str) -> Result<()> {
    let mut tracker = ctx.tracker();

    match tracker.remove_event(id)? {
        Some(event) => println!("{}", format!("  Removed: {}", event.title).red()),
        None => println!("{}", format!("  No event with id {}", id).dimmed()),
    }
    Ok(())
}

pub fn list(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let tracker = ctx.tracker();
    let limit = limit.unwrap_or(ctx.config.upcoming_limit);

    let upcoming = tracker.session().upcoming(ctx.today, limit);
    println!("{}", render::event_list(&upcoming));
    Ok(())
}

pub fn on(ctx: &Context, date: &str) -> Result<()> {
    let date = dates::parse_date(date)?;
    let tracker = ctx.tracker();

    let events = tracker.session().on_date(date);
    if events.is_empty() {
        println!("{}", format!("Nothing on {}", date).dimmed());
        return Ok(());
    }
    println!("{}", render::event_list(&events));
    Ok(())
}
