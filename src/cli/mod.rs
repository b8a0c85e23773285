pub mod begin;
pub mod checklist;
pub mod daemon_path;
pub mod interactive;
pub mod process;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use begin::{process_begin_command, BeginCommand};
use clap::{Parser, Subcommand};
use interactive::run_interactive;
use process::{restart_server, stop_server};
use tracing::level_filters::LevelFilter;

use crate::{
    config::{ProgramConfig, EXPORT_DIR},
    daemon::{create_tracker, start_daemon},
    storage::kv::FileKeyValueStore,
    tracker::Tracker,
    utils::{
        clock::{Clock, DefaultClock},
        dir::resolve_application_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Bootcamp", version, long_about = None)]
#[command(about = "Daily checklist for a 90-day bootcamp", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Record the moment day 1 starts")]
    Begin {
        #[command(flatten)]
        command: BeginCommand,
    },
    #[command(about = "Show which day of the program it is")]
    Status {},
    #[command(about = "Show the checklist of a day")]
    Show {
        #[arg(long, short, help = "Day to show. Defaults to today")]
        day: Option<i64>,
    },
    #[command(about = "Mark a task as done")]
    Check {
        #[arg(help = "Index of the task, as shown by `show`")]
        task: usize,
        #[arg(long, short, help = "Day of the task. Defaults to today")]
        day: Option<i64>,
    },
    #[command(about = "Mark a task as not done")]
    Uncheck {
        #[arg(help = "Index of the task, as shown by `show`")]
        task: usize,
        #[arg(long, short, help = "Day of the task. Defaults to today")]
        day: Option<i64>,
    },
    #[command(about = "Export progress of a day as Day{N}_progress.json")]
    Export {
        #[arg(long, short, help = "Day to export. Defaults to today")]
        day: Option<i64>,
        #[arg(long, short, help = "Output directory. Defaults to the exports directory")]
        out: Option<PathBuf>,
    },
    #[command(about = "Browse and tick off tasks interactively")]
    Interactive {},
    #[command(about = "Starts a daemon that refreshes the day at midnight and exports progress at 23:59")]
    Init {},
    #[command(about = "Run a daemon directly in current console. Used for debugging")]
    Serve {},
    #[command(about = "Stop currently running daemon.")]
    Stop {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = resolve_application_path(args.dir)?;
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let clock = DefaultClock;

    match args.commands {
        Commands::Begin { command } => process_begin_command(command, &app_dir).await,
        Commands::Init {} => restart_server(&app_dir),
        Commands::Stop {} => stop_server(),
        Commands::Serve {} => start_daemon(app_dir).await,
        Commands::Status {} => {
            let tracker = load_tracker(&app_dir).await?;
            print!("{}", checklist::status(&tracker, clock.time()).await?);
            Ok(())
        }
        Commands::Show { day } => {
            let tracker = load_tracker(&app_dir).await?;
            print!("{}", checklist::show(&tracker, day, clock.time()).await?);
            Ok(())
        }
        Commands::Check { task, day } => {
            let tracker = load_tracker(&app_dir).await?;
            print!("{}", checklist::mark(&tracker, day, task, true, clock.time()).await?);
            Ok(())
        }
        Commands::Uncheck { task, day } => {
            let tracker = load_tracker(&app_dir).await?;
            print!("{}", checklist::mark(&tracker, day, task, false, clock.time()).await?);
            Ok(())
        }
        Commands::Export { day, out } => {
            let tracker = load_tracker(&app_dir).await?;
            let out = out.unwrap_or_else(|| app_dir.join(EXPORT_DIR));
            let path = checklist::export(&tracker, day, &out, clock.time()).await?;
            println!("Exported into {}", path.display());
            Ok(())
        }
        Commands::Interactive {} => {
            let tracker = load_tracker(&app_dir).await?;
            run_interactive(&tracker, app_dir.join(EXPORT_DIR), &clock).await
        }
    }
}

async fn load_tracker(app_dir: &Path) -> Result<Tracker<FileKeyValueStore>> {
    let config = ProgramConfig::require(app_dir).await?;
    create_tracker(app_dir, &config)
}
