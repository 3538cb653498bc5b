use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use nua_core::grid::YearMonth;
use nua_core::session::Session;

use crate::Context;
use crate::render;

pub fn run(ctx: &Context, month: Option<&str>, offset: i32) -> Result<()> {
    let month = resolve_month(month, offset, ctx.today)?;
    let tracker = ctx.tracker();

    println!("{}", month_view(tracker.session(), month, ctx.today));
    Ok(())
}

pub fn month_view(session: &Session, month: YearMonth, today: NaiveDate) -> String {
    let cells = session.grid(month, today);
    render::calendar(month, &cells)
}

/// Pick the month to show: an explicit `YYYY-MM` or today's month, then shifted.
fn resolve_month(month: Option<&str>, offset: i32, today: NaiveDate) -> Result<YearMonth> {
    let base = match month {
        Some(s) => s.parse::<YearMonth>()?,
        None => YearMonth::of(today).context("Today is outside the supported calendar range")?,
    };
    base.offset(offset)
        .with_context(|| format!("{} shifted by {} months is out of range", base, offset))
}
