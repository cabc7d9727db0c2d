mod commands;
mod render;
mod utils;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use daygrid_core::daygrid::DayGrid;
use daygrid_core::{Clock, SystemClock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::add::AddArgs;
use commands::edit::EditArgs;

#[derive(Parser)]
#[command(name = "daygrid")]
#[command(about = "A month-grid calendar with local event storage")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid (defaults to the current month)
    Show {
        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Select a day and list its events (YYYY-MM-DD, today, fri, dec 31)
        #[arg(short, long)]
        select: Option<String>,

        /// Only show the week containing the selected day
        #[arg(short, long)]
        week: bool,
    },
    /// Create an event
    Add {
        title: Option<String>,

        /// Day of the event (YYYY-MM-DD, today, fri, dec 31)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// Colour as #rrggbb
        #[arg(short, long)]
        color: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of an existing event (an empty value clears optional fields)
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        color: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event by id
    Delete { id: String },
    /// List events on a day
    List {
        #[arg(default_value = "today")]
        date: String,
    },
    /// Remove every stored event
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive month view driven by short commands on stdin
    Browse,
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let daygrid = DayGrid::load()?;
    debug!(data_dir = %daygrid.display_path().display(), "Loaded config");
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let today = clock.today();

    match cli.command.unwrap_or(Commands::Show {
        month: None,
        select: None,
        week: false,
    }) {
        Commands::Show {
            month,
            select,
            week,
        } => {
            let month = month.as_deref().map(utils::parse_month).transpose()?;
            let select = select
                .as_deref()
                .map(|s| utils::parse_date(s, today))
                .transpose()?;
            commands::show::run(&daygrid, clock, month, select, week)
        }
        Commands::Add {
            title,
            date,
            start,
            end,
            color,
            description,
        } => {
            let date = utils::parse_date(&date, today)?;
            commands::add::run(
                &daygrid,
                clock,
                AddArgs {
                    title,
                    date,
                    start,
                    end,
                    color,
                    description,
                },
            )
        }
        Commands::Edit {
            id,
            title,
            date,
            start,
            end,
            color,
            description,
        } => commands::edit::run(
            &daygrid,
            clock,
            EditArgs {
                id,
                title,
                date,
                start,
                end,
                color,
                description,
            },
        ),
        Commands::Delete { id } => commands::delete::run(&daygrid, clock, &id),
        Commands::List { date } => {
            let date = utils::parse_date(&date, today)?;
            commands::list::run(&daygrid, clock, date)
        }
        Commands::Clear { yes } => commands::clear::run(&daygrid, clock, yes),
        Commands::Browse => commands::browse::run(&daygrid, clock).await,
    }
}
