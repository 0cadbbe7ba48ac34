//! Command handlers: one per subcommand, each driving `TrackerService`.

use crate::cli::{CalendarArgs, Cli, Command};
use crate::render;
use chrono::Datelike;
use log::info;
use positions_core::db::open_db;
use positions_core::{
    displayable_years, CommandOutcome, SqliteDocumentRepository, SystemClock, TrackerConfig, TrackerService,
    EXPORT_FILE_NAME,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub type CommandResult = Result<(), Box<dyn Error>>;

pub fn run(cli: &Cli, config: &TrackerConfig) -> CommandResult {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteDocumentRepository::try_new(&conn)?;
    let mut tracker = TrackerService::open(repo, SystemClock)?;
    info!("event=cli_command module=cli status=start");

    match &cli.command {
        Command::Status => print!("{}", render::status(&tracker.progress())),
        Command::Calendar(args) => {
            position_calendar(&mut tracker, args)?;
            let year = tracker.view().year;
            let grid = tracker
                .calendar()
                .ok_or_else(|| format!("year {year} cannot be displayed"))?;
            print!("{}", render::calendar(&grid));
        }
        Command::Board(args) => {
            tracker.set_filter(args.filter.into());
            print!("{}", render::board(&tracker.board()));
        }
        Command::Check { number } => println!("{}", render::hint(&tracker.input_number_changed(number))),
        Command::Pick { date, number, yes } => {
            match tracker.submit_pick(date, number, &mut confirmer(*yes))? {
                CommandOutcome::Applied(entry) => {
                    println!("Locked in #{} for {}.", entry.number, entry.date_iso());
                    if let Some(grid) = tracker.calendar() {
                        print!("{}", render::calendar(&grid));
                    }
                }
                CommandOutcome::Declined => println!("Cancelled."),
            }
        }
        Command::Export { out } => {
            let path = out.clone().unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            std::fs::write(&path, tracker.export_json()?)?;
            println!("Exported {} pick(s) to {}.", tracker.entries().len(), path.display());
        }
        Command::Import { path, yes } => {
            let text = std::fs::read_to_string(path)?;
            match tracker.import(&text, &mut confirmer(*yes))? {
                CommandOutcome::Applied(count) => println!("Import successful ({count} pick(s))."),
                CommandOutcome::Declined => println!("Cancelled."),
            }
        }
        Command::Reset { yes } => match tracker.reset_all(&mut confirmer(*yes))? {
            CommandOutcome::Applied(()) => println!("All picks removed."),
            CommandOutcome::Declined => println!("Cancelled."),
        },
    }
    Ok(())
}

fn position_calendar<R, C>(tracker: &mut TrackerService<R, C>, args: &CalendarArgs) -> CommandResult
where
    R: positions_core::DocumentRepository,
    C: positions_core::Clock,
{
    if let Some(month) = args.month {
        let year = args.year.unwrap_or_else(|| tracker.today().year());
        let years = displayable_years();
        if !years.contains(&year) {
            return Err(format!(
                "year {year} is out of range {}..={}",
                years.start(),
                years.end()
            )
            .into());
        }
        tracker.show_month(year, month - 1);
    }
    for _ in 0..args.prev.unwrap_or(0) {
        tracker.prev_month();
    }
    for _ in 0..args.next.unwrap_or(0) {
        tracker.next_month();
    }
    Ok(())
}

/// Confirmation port backed by stdin, or auto-accepting with `--yes`.
fn confirmer(assume_yes: bool) -> impl FnMut(&str) -> bool {
    move |message: &str| {
        if assume_yes {
            return true;
        }
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
