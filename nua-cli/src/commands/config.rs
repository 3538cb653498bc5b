use anyhow::Result;
use nua_core::config::CycleConfig;
use nua_core::persistence::STORAGE_KEY;
use owo_colors::OwoColorize;

use crate::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config_path = CycleConfig::config_path()?;
    let store = ctx.config.file_store();

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", ctx.config.display_path().display());
    println!("  File:    {}", store.path_for(STORAGE_KEY).display());

    println!();
    println!("{}", "Settings".bold());
    println!("  Upcoming limit:        {}", ctx.config.upcoming_limit);
    println!("  Default cycle length:  {}", ctx.config.default_cycle_length());

    Ok(())
}
