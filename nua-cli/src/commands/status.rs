use anyhow::Result;
use chrono::NaiveDate;
use nua_core::session::Session;

use crate::Context;
use crate::render;

pub fn run(ctx: &Context) -> Result<()> {
    let tracker = ctx.tracker();
    println!("{}", dashboard(tracker.session(), ctx.today));
    Ok(())
}

/// Phase card, next period and progress, separated by blank lines.
pub fn dashboard(session: &Session, today: NaiveDate) -> String {
    let current = session.current_phase(today);

    [
        render::phase_card(current.as_ref()),
        render::next_period(session.next_period(), session.countdown(today)),
        render::progress_bar(current.as_ref(), session.progress(today)),
    ]
    .join("\n\n")
}
