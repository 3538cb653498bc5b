use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use chrono::NaiveDate;
use nua_core::grid::YearMonth;
use nua_core::persistence::{FileStore, STORAGE_KEY};
use nua_core::schedule::{Debouncer, DelayedTask};
use nua_core::session::Tracker;
use owo_colors::OwoColorize;
use tokio::sync::oneshot;

use crate::Context;
use crate::commands::{calendar, status};

/// Quiet time after the last detected change before redrawing.
const SETTLE_WINDOW: Duration = Duration::from_millis(300);

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn run(ctx: &Context, interval: u64, stop_after: Option<u64>) -> Result<()> {
    let store = ctx.config.file_store();
    let path = store.path_for(STORAGE_KEY);
    let today = ctx.today;

    redraw(&store, today);

    let debouncer = {
        let store = store.clone();
        Debouncer::new(SETTLE_WINDOW, move || redraw(&store, today))
    };

    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    // Cancelled when dropped on Ctrl-C
    let _stop_timer = stop_after.map(|secs| {
        DelayedTask::schedule(Duration::from_secs(secs), move || {
            let _ = stop_tx.send(());
        })
    });

    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    let mut last_seen = modified(&path);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = modified(&path);
                if current != last_seen {
                    tracing::debug!(path = %path.display(), "data file changed");
                    last_seen = current;
                    debouncer.notify();
                }
            }
            _ = tokio::signal::ctrl_c() => break,
            Ok(()) = &mut stop_rx => break,
        }
    }

    Ok(())
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn redraw(store: &FileStore, today: NaiveDate) {
    let tracker = Tracker::open(store.clone());
    let session = tracker.session();

    print!("{}", CLEAR_SCREEN);
    println!("{}", status::dashboard(session, today));
    println!();
    if let Some(month) = YearMonth::of(today) {
        println!("{}", calendar::month_view(session, month, today));
        println!();
    }
    println!("{}", "Watching for changes, Ctrl-C to quit".dimmed());
}
