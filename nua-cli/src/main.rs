mod commands;
mod dates;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nua_core::config::CycleConfig;
use nua_core::persistence::FileStore;
use nua_core::session::Tracker;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nua")]
#[command(about = "Track your cycle, its phases and related events")]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD or e.g. "tomorrow")
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the start date of your last period and your cycle length
    Configure {
        /// First day of your last period (YYYY-MM-DD)
        #[arg(short, long)]
        last_period: Option<String>,

        /// Cycle length in days (21-35)
        #[arg(short = 'n', long)]
        length: Option<String>,
    },
    /// Show the current phase, next period and cycle progress
    Status,
    /// Show a month with phases and events
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Move this many months forward (or back, if negative)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Add, remove and list events
    #[command(subcommand)]
    Event(EventCommand),
    /// Keep status and calendar on screen, refreshing when data changes
    Watch {
        /// Seconds between checks for changes
        #[arg(long, default_value_t = 1)]
        interval: u64,

        /// Stop watching after this many seconds
        #[arg(long = "for")]
        stop_after: Option<u64>,
    },
    /// Show config and data paths
    Config,
}

#[derive(Subcommand)]
enum EventCommand {
    /// Log a period, appointment or medication
    Add {
        /// period, appointment or medication
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Date of the event (YYYY-MM-DD, or e.g. "tomorrow")
        #[arg(short, long)]
        date: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event by id
    Remove { id: String },
    /// List upcoming events
    List {
        /// Maximum number of events to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List events on a given date
    On { date: String },
}

/// Resolved settings shared by all commands.
pub struct Context {
    pub config: CycleConfig,
    pub today: NaiveDate,
}

impl Context {
    fn load(today: Option<&str>) -> Result<Self> {
        let config = CycleConfig::load()?;
        let today = match today {
            Some(input) => dates::parse_date(input)?,
            None => chrono::Local::now().date_naive(),
        };
        Ok(Context { config, today })
    }

    pub fn tracker(&self) -> Tracker<FileStore> {
        Tracker::open(self.config.file_store())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NUA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let ctx = Context::load(cli.today.as_deref())?;

    match cli.command {
        Commands::Configure {
            last_period,
            length,
        } => commands::configure::run(&ctx, last_period, length),
        Commands::Status => commands::status::run(&ctx),
        Commands::Calendar { month, offset } => {
            commands::calendar::run(&ctx, month.as_deref(), offset)
        }
        Commands::Event(cmd) => match cmd {
            EventCommand::Add {
                kind,
                date,
                title,
                description,
            } => commands::event::add(&ctx, &kind, &date, &title, description.as_deref()),
            EventCommand::Remove { id } => commands::event::remove(&ctx, &id),
            EventCommand::List { limit } => commands::event::list(&ctx, limit),
            EventCommand::On { date } => commands::event::on(&ctx, &date),
        },
        Commands::Watch {
            interval,
            stop_after,
        } => commands::watch::run(&ctx, interval, stop_after).await,
        Commands::Config => commands::config::run(&ctx),
    }
}
