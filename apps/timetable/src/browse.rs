//! Interactive day-by-day browsing.

use anyhow::Result;
use client_core::{CarouselEvent, ScheduleApp, ScheduleCache, TimetableSource, ViewMode};
use shared::domain::DayIndex;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::{
    render::render_day,
    terminal::{parse_day, TerminalCarousel, TerminalIndicator},
};

pub type TerminalApp<S, C> = ScheduleApp<S, C, TerminalCarousel, TerminalIndicator>;

const HELP: &str = "\
commands:
  n | next             next day
  p | prev             previous day
  swipe <day>          swipe the carousel to a day (1-5 or a weekday name)
  search <text>        free rooms matching text
  sections             back to the section timetable
  link <url>           set the spreadsheet link for the next update
  set <sections>       set the sections for the next update
  update               fetch the timetable for the link and sections
  show                 print the current day again
  q | quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Swipe(DayIndex),
    Search(String),
    Sections,
    Link(String),
    SetSections(String),
    Update,
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word.to_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" => Ok(Self::Prev),
            "swipe" => parse_day(rest)
                .map(Self::Swipe)
                .ok_or_else(|| format!("unknown day '{rest}'")),
            "search" | "/" => Ok(Self::Search(rest.to_string())),
            "sections" => Ok(Self::Sections),
            "link" if !rest.is_empty() => Ok(Self::Link(rest.to_string())),
            "set" => Ok(Self::SetSections(rest.to_string())),
            "update" => Ok(Self::Update),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(format!("unknown command '{line}', try 'help'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Current page text, or why there is none.
pub fn page_text<S, C>(app: &TerminalApp<S, C>) -> String
where
    S: TimetableSource,
    C: ScheduleCache,
{
    let mut text = match (app.day_label(), app.current_view()) {
        (Some(label), Some(view)) => {
            render_day(label, app.view_mode(), app.displayed_sections(), &view)
        }
        _ => "No timetable loaded. Use 'link' and 'set', then 'update'.\n".to_string(),
    };
    if let Some(message) = app.error_message() {
        text.push_str(&format!("error: {message}\n"));
    }
    text
}

pub async fn apply<S, C>(app: &mut TerminalApp<S, C>, command: BrowseCommand) -> Outcome
where
    S: TimetableSource,
    C: ScheduleCache,
{
    match command {
        BrowseCommand::Next => {
            app.next_day();
        }
        BrowseCommand::Prev => {
            app.prev_day();
        }
        BrowseCommand::Swipe(index) => {
            app.days_mut().carousel_mut().swipe_to(index);
            app.carousel_event(CarouselEvent::Settled(index));
        }
        BrowseCommand::Search(query) => app.set_view_mode(ViewMode::search(query)),
        BrowseCommand::Sections => app.set_view_mode(ViewMode::Sections),
        BrowseCommand::Link(link) => {
            app.form.sheet_link = link;
            return Outcome::Continue(format!("link set to {}\n", app.form.sheet_link));
        }
        BrowseCommand::SetSections(input) => {
            app.form.sections_input = input;
            return Outcome::Continue(format!("sections set to '{}'\n", app.form.sections_input));
        }
        BrowseCommand::Update => {
            app.submit().await;
        }
        BrowseCommand::Show => {}
        BrowseCommand::Help => return Outcome::Continue(format!("{HELP}\n")),
        BrowseCommand::Quit => return Outcome::Quit,
    }
    Outcome::Continue(page_text(app))
}

pub async fn run<S, C>(app: &mut TerminalApp<S, C>) -> Result<()>
where
    S: TimetableSource,
    C: ScheduleCache,
{
    app.carousel_event(CarouselEvent::Ready);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(page_text(app).as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = match BrowseCommand::parse(&line) {
            Ok(command) => {
                debug!(?command, "browse: command");
                match apply(app, command).await {
                    Outcome::Continue(text) => text,
                    Outcome::Quit => break,
                }
            }
            Err(message) => format!("{message}\n"),
        };
        stdout.write_all(text.as_bytes()).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
