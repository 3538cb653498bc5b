//! TUI rendering for nua-core types.
//!
//! Extension traits that turn computed phase, countdown, grid and event data
//! into colored terminal text using owo_colors.

use chrono::NaiveDate;
use nua_core::estimate::{Countdown, CurrentPhase};
use nua_core::event::Event;
use nua_core::grid::{CalendarCell, YearMonth};
use nua_core::phase::{self, PHASES};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of the progress bar, in characters.
const PROGRESS_WIDTH: usize = 28;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Parse `#RRGGBB`. Malformed colors render as white.
fn rgb(hex: &str) -> (u8, u8, u8) {
    let parse = |range: std::ops::Range<usize>| {
        hex.trim_start_matches('#')
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(255)
    };
    (parse(0..2), parse(2..4), parse(4..6))
}

fn badge(text: &str, dark: &str) -> String {
    let (r, g, b) = rgb(dark);
    format!(" {} ", text).white().bold().on_truecolor(r, g, b).to_string()
}

fn dot(hex: &str) -> String {
    let (r, g, b) = rgb(hex);
    "•".truecolor(r, g, b).to_string()
}

impl Render for Countdown {
    fn render(&self) -> String {
        match self {
            Countdown::Overdue(0) => "Expected today".to_string(),
            Countdown::Overdue(1) => "Should have started 1 day ago".to_string(),
            Countdown::Overdue(days) => format!("Should have started {} days ago", days),
            Countdown::Tomorrow => "Expected tomorrow".to_string(),
            Countdown::InDays(days) => format!("Expected in {} days", days),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let date = self.date.format("%-d %b").to_string().to_uppercase();
        let mut line = format!(
            "{} {:>6}  {} {}",
            dot(self.kind.dot_color()),
            date.bold(),
            self.title,
            format!("[{}]", self.kind).dimmed()
        );
        if !self.description.is_empty() {
            line.push_str(&format!("\n           {}", self.description.dimmed()));
        }
        line
    }
}

/// Phase card: badge, "Day X of Y" and the phase tip.
pub fn phase_card(current: Option<&CurrentPhase>) -> String {
    let Some(current) = current else {
        return "Configure your cycle to see phase information (nua configure)"
            .dimmed()
            .to_string();
    };

    let day_line = format!("Day {} of {}", current.cycle_day, current.cycle_length);

    match current.phase {
        Some(matched) => {
            let def = matched.phase;
            format!(
                "{}  {}\n\n{}",
                badge(&def.name.to_uppercase(), def.colors.dark),
                day_line.dimmed(),
                def.tip
            )
        }
        None => format!("{}  {}", "NO PHASE".dimmed(), day_line.dimmed()),
    }
}

/// Next period date and the countdown to it.
pub fn next_period(next: Option<NaiveDate>, countdown: Option<Countdown>) -> String {
    match (next, countdown) {
        (Some(next), Some(countdown)) => format!(
            "{}  {}",
            next.format("%-d %b").to_string().to_uppercase().bold(),
            countdown.render()
        ),
        _ => "Next period: -".dimmed().to_string(),
    }
}

pub fn progress_bar(current: Option<&CurrentPhase>, percent: Option<f64>) -> String {
    let (Some(current), Some(percent)) = (current, percent) else {
        return format!("{}\n{}", "Day - of -".dimmed(), "░".repeat(PROGRESS_WIDTH).dimmed());
    };

    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    let color = current
        .phase
        .map(|m| m.phase.colors.dark)
        .unwrap_or(nua_core::event::DEFAULT_ACCENT);
    let (r, g, b) = rgb(color);

    format!(
        "Day {} of {}  {}\n{}{}",
        current.cycle_day,
        current.cycle_length,
        format!("{:.0}%", percent).dimmed(),
        "█".repeat(filled).truecolor(r, g, b),
        "░".repeat(PROGRESS_WIDTH - filled).dimmed()
    )
}

fn render_cell(cell: &CalendarCell) -> String {
    let number = format!("{:>2}", cell.day);

    if !cell.in_month {
        return format!(" {} ", number.dimmed());
    }

    let number = match cell.phase {
        Some(p) => {
            let colors = phase::definition(p.key).colors;
            let (fr, fg, fb) = rgb(colors.dark);
            let (br, bg, bb) = rgb(colors.light);
            number.truecolor(fr, fg, fb).on_truecolor(br, bg, bb).to_string()
        }
        None => number,
    };
    let number = if cell.is_today {
        number.bold().underline().to_string()
    } else {
        number
    };

    let marker = cell.event_dot.map(dot).unwrap_or_else(|| " ".to_string());
    format!(" {}{}", number, marker)
}

/// Month grid with a weekday header and a phase legend.
pub fn calendar(month: YearMonth, cells: &[CalendarCell]) -> String {
    let mut lines = vec![month.title().bold().to_string()];

    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!(" {} ", d.dimmed()))
            .collect::<String>(),
    );

    for week in cells.chunks(7) {
        lines.push(week.iter().map(render_cell).collect::<String>());
    }

    lines.push(String::new());
    lines.push(legend());
    lines.join("\n")
}

fn legend() -> String {
    PHASES
        .iter()
        .map(|p| {
            let (r, g, b) = rgb(p.colors.light);
            format!("{} {}", "  ".on_truecolor(r, g, b), p.key)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "No upcoming entries".dimmed().to_string();
    }

    events
        .iter()
        .map(|e| format!("{}\n           {}", e.render(), e.id.dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}
