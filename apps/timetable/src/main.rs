use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    today_day_index, DayCarouselController, FetchState, ScheduleApp, ScheduleCache,
    ScheduleOrchestrator, StorageScheduleCache, TimetableClient, ViewMode,
};
use storage::Storage;
use tracing_subscriber::EnvFilter;

mod browse;
mod config;
mod render;
mod terminal;

use browse::{page_text, TerminalApp};
use config::{load_settings, ClientSettings};
use terminal::{parse_day, TerminalCarousel, TerminalIndicator};

#[derive(Parser, Debug)]
#[command(name = "timetable", about = "Class timetable viewer with an offline cache")]
struct Cli {
    /// Timetable server base url.
    #[arg(long)]
    server_url: Option<String>,
    /// SQLite url of the local cache.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one day, today by default.
    Show {
        /// 1-5 or a weekday name.
        #[arg(long)]
        day: Option<String>,
        /// Show free rooms matching this text instead of the timetable.
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch the timetable for a spreadsheet link and section list.
    Update {
        #[arg(long)]
        url: String,
        /// Comma or space separated, e.g. "BCS-6A, BCS-6G".
        #[arg(long)]
        sections: String,
    },
    /// Step through the week interactively.
    Browse,
    /// Show what the local cache holds.
    Status,
}

type CliApp = TerminalApp<TimetableClient, StorageScheduleCache>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(url) = cli.server_url {
        settings.server_url = url;
    }
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = open_app(&settings).await?;

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            app.start().await;
            browse::run(&mut app).await?;
        }
        Command::Show { day, search } => {
            app.start().await;
            if let Some(day) = day {
                let index = parse_day(&day).ok_or_else(|| anyhow!("unknown day '{day}'"))?;
                app.days_mut().select(index);
            }
            if let Some(query) = search {
                app.set_view_mode(ViewMode::search(query));
            }
            print!("{}", page_text(&app));
            if app.bundle().is_none() {
                bail!("no timetable available");
            }
        }
        Command::Update { url, sections } => {
            app.form.sheet_link = url;
            app.form.sections_input = sections;
            let state = app.submit().await;
            print!("{}", page_text(&app));
            if state == FetchState::Error {
                bail!(
                    "update failed: {}",
                    app.error_message().unwrap_or("unknown error")
                );
            }
        }
        Command::Status => print_status(&app, &settings).await?,
    }

    Ok(())
}

async fn open_app(settings: &ClientSettings) -> Result<CliApp> {
    let storage = Storage::new(&settings.database_url)
        .await
        .with_context(|| format!("failed to open cache at '{}'", settings.database_url))?;
    let orchestrator = ScheduleOrchestrator::new(
        TimetableClient::new(settings.server_url.clone()),
        StorageScheduleCache::new(storage),
    );
    let days = DayCarouselController::new(
        today_day_index(),
        TerminalCarousel::default(),
        TerminalIndicator::default(),
    );
    Ok(ScheduleApp::new(orchestrator, days))
}

async fn print_status(app: &CliApp, settings: &ClientSettings) -> Result<()> {
    let cache = app.orchestrator().cache();
    println!("server:   {}", settings.server_url);
    println!("database: {}", settings.database_url);
    match (cache.last_written_at().await?, cache.read().await) {
        (Some(written_at), Some(bundle)) => {
            println!("cached:   {}", written_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("sheet:    {}", bundle.source_url());
            println!("sections: {}", bundle.sections().joined());
        }
        (Some(_), None) => println!("cached:   unreadable record, the next start will refetch"),
        (None, _) => println!("cached:   nothing yet"),
    }
    Ok(())
}
