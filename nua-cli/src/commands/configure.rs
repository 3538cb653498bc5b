use anyhow::Result;
use dialoguer::Input;
use nua_core::session::ConfigureForm;
use nua_core::{CycleError, CycleLength};
use owo_colors::OwoColorize;

use crate::Context;
use crate::dates;

pub fn run(ctx: &Context, last_period: Option<String>, length: Option<String>) -> Result<()> {
    let interactive = last_period.is_none() || length.is_none();

    // --- Last period ---
    let last_period = match last_period {
        Some(d) => dates::normalize_date(&d)?,
        None => prompt_with_retry("  First day of your last period", None, |input| {
            let normalized = dates::normalize_date(input)?;
            nua_core::cycle::parse_date(&normalized)?;
            Ok(normalized)
        })?,
    };

    // --- Cycle length ---
    let length = match length {
        Some(n) => n,
        None => {
            let default = ctx.config.default_cycle_length().to_string();
            prompt_with_retry("  Cycle length in days", Some(default), |input| {
                CycleLength::parse(input)?;
                Ok(input.trim().to_string())
            })?
        }
    };

    let mut tracker = ctx.tracker();
    let form = ConfigureForm {
        last_period_date: &last_period,
        cycle_length: &length,
    };

    match tracker.configure(&form) {
        Ok(()) => {}
        Err(CycleError::Validation(e)) => {
            anyhow::bail!(
                "{}\nCheck that the date is valid and the cycle is between {} and {} days.",
                e,
                CycleLength::MIN,
                CycleLength::MAX
            )
        }
        Err(e) => return Err(e.into()),
    }

    if interactive {
        println!();
    }
    let profile = tracker.session().profile;
    println!(
        "{}",
        format!(
            "  Saved: cycle of {} days starting {}",
            profile.length,
            last_period
        )
        .green()
    );

    Ok(())
}

/// Prompt the user, asking again until the input validates.
fn prompt_with_retry<F>(prompt: &str, default: Option<String>, validate: F) -> Result<String>
where
    F: Fn(&str) -> Result<String>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = &default {
            input = input.default(default.clone());
        }
        let value = input.interact_text()?;

        match validate(&value) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
