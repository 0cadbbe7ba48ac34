//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one synchronous function per UI command.
//! - Translate core results into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - No session state is kept here: the UI passes the displayed month in
//!   and receives the new one back.
//! - Mutating calls take an explicit `confirmed` flag; with `false` they
//!   validate and return the confirmation prompt without writing.

use log::warn;
use positions_core::db::open_db;
use positions_core::model::entry::DATE_FORMAT;
use positions_core::{
    core_version as core_version_inner, displayable_years, init_logging as init_logging_inner,
    ping as ping_inner, Clock, CommandOutcome, DayPick, NumberFilter, NumberStatus,
    SqliteDocumentRepository, SystemClock, TrackerConfig, TrackerService, ViewState,
    EXPORT_FILE_NAME,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same arguments.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Displayed month. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPosition {
    pub year: i32,
    pub month: u32,
}

impl From<&ViewState> for ViewPosition {
    fn from(view: &ViewState) -> Self {
        Self {
            year: view.year,
            month: view.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Picked number, if any.
    pub number: Option<u16>,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarResponse {
    pub ok: bool,
    pub message: String,
    pub label: String,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    pub number: u16,
    pub used_on: Option<String>,
    pub disabled: bool,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintResponse {
    /// `empty|invalid|used|available`.
    pub status: String,
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressResponse {
    pub ok: bool,
    pub message: String,
    pub picks: u32,
    pub remaining: u32,
    pub last_pick: Option<String>,
    /// `#NNN (YYYY-MM-DD)` lines ordered by number.
    pub used: Vec<String>,
}

/// Generic envelope for mutating commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// True when the command was valid but not confirmed.
    pub needs_confirmation: bool,
    pub message: String,
    /// Month to display afterwards, when the command moves the view.
    pub view: Option<ViewPosition>,
}

impl ActionResponse {
    fn success(message: impl Into<String>, view: Option<ViewPosition>) -> Self {
        Self {
            ok: true,
            needs_confirmation: false,
            message: message.into(),
            view,
        }
    }

    fn confirm(prompt: impl Into<String>) -> Self {
        Self {
            ok: false,
            needs_confirmation: true,
            message: prompt.into(),
            view: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            needs_confirmation: false,
            message: message.into(),
            view: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub message: String,
    pub file_name: String,
    /// Pretty-printed JSON document; empty on failure.
    pub content: String,
}

/// Month containing today.
#[flutter_rust_bridge::frb(sync)]
pub fn view_today() -> ViewPosition {
    ViewPosition::from(&ViewState::starting_at(SystemClock.today()))
}

/// Month before `year`/`month`.
#[flutter_rust_bridge::frb(sync)]
pub fn view_prev_month(year: i32, month: u32) -> ViewPosition {
    let mut view = view_at(year, month);
    view.prev_month();
    ViewPosition::from(&view)
}

/// Month after `year`/`month`.
#[flutter_rust_bridge::frb(sync)]
pub fn view_next_month(year: i32, month: u32) -> ViewPosition {
    let mut view = view_at(year, month);
    view.next_month();
    ViewPosition::from(&view)
}

/// Calendar grid for `year`/zero-based `month`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(year: i32, month: u32) -> CalendarResponse {
    calendar_month_at(&resolve_db_path(), year, month)
}

/// Number board under `filter` (`all|available|used`).
#[flutter_rust_bridge::frb(sync)]
pub fn number_board(filter: String) -> BoardResponse {
    number_board_at(&resolve_db_path(), &filter)
}

/// Availability hint for the number input.
#[flutter_rust_bridge::frb(sync)]
pub fn number_hint(value: String) -> HintResponse {
    number_hint_at(&resolve_db_path(), &value)
}

/// Hint after a board chip is clicked.
#[flutter_rust_bridge::frb(sync)]
pub fn click_available_number(number: u16) -> HintResponse {
    number_hint_at(&resolve_db_path(), &number.to_string())
}

#[flutter_rust_bridge::frb(sync)]
pub fn progress_summary() -> ProgressResponse {
    progress_summary_at(&resolve_db_path())
}

/// Validates and, when `confirmed`, locks in a pick.
#[flutter_rust_bridge::frb(sync)]
pub fn pick_submit(date: String, number: String, confirmed: bool) -> ActionResponse {
    pick_submit_at(&resolve_db_path(), &date, &number, confirmed)
}

#[flutter_rust_bridge::frb(sync)]
pub fn export_json() -> ExportResponse {
    export_json_at(&resolve_db_path())
}

/// Validates `content` and, when `confirmed`, replaces all picks.
#[flutter_rust_bridge::frb(sync)]
pub fn import_json(content: String, confirmed: bool) -> ActionResponse {
    import_json_at(&resolve_db_path(), &content, confirmed)
}

/// Removes all picks when `confirmed`.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_all(confirmed: bool) -> ActionResponse {
    reset_all_at(&resolve_db_path(), confirmed)
}

type Tracker<'conn> = TrackerService<SqliteDocumentRepository<'conn>, SystemClock>;

fn with_tracker<T>(db_path: &Path, f: impl FnOnce(&mut Tracker<'_>) -> T) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let repo = SqliteDocumentRepository::try_new(&conn)
        .map_err(|err| format!("tracker repo init failed: {err}"))?;
    let mut tracker =
        TrackerService::open(repo, SystemClock).map_err(|err| format!("tracker load failed: {err}"))?;
    Ok(f(&mut tracker))
}

fn view_at(year: i32, month: u32) -> ViewState {
    ViewState::at(year, month, NumberFilter::All)
}

fn calendar_month_at(db_path: &Path, year: i32, month: u32) -> CalendarResponse {
    let failure = |message: String| CalendarResponse {
        ok: false,
        message,
        label: String::new(),
        leading_blanks: 0,
        days: Vec::new(),
    };
    if month > 11 {
        return failure(format!("month {month} is out of range 0..=11"));
    }
    let years = displayable_years();
    if !years.contains(&year) {
        return failure(format!(
            "year {year} is out of range {}..={}",
            years.start(),
            years.end()
        ));
    }

    match with_tracker(db_path, |tracker| {
        tracker.show_month(year, month);
        tracker.calendar()
    }) {
        Ok(Some(grid)) => CalendarResponse {
            ok: true,
            message: String::new(),
            label: grid.label,
            leading_blanks: grid.leading_blanks,
            days: grid
                .cells
                .into_iter()
                .map(|cell| CalendarDay {
                    day: cell.day,
                    date: cell.date.format(DATE_FORMAT).to_string(),
                    number: match cell.pick {
                        DayPick::Picked(number) => Some(number),
                        DayPick::Available => None,
                    },
                    is_today: cell.is_today,
                })
                .collect(),
        },
        Ok(None) => failure(format!("year {year} cannot be displayed")),
        Err(err) => failure(format!("calendar_month failed: {err}")),
    }
}

fn number_board_at(db_path: &Path, filter: &str) -> BoardResponse {
    let result = with_tracker(db_path, |tracker| {
        tracker.change_filter(filter).map(|_| tracker.board())
    });
    match result {
        Ok(Ok(chips)) => BoardResponse {
            ok: true,
            message: format!("{} number(s).", chips.len()),
            items: chips
                .into_iter()
                .map(|chip| BoardItem {
                    number: chip.number,
                    used_on: chip.used_on.map(|date| date.format(DATE_FORMAT).to_string()),
                    disabled: chip.is_disabled(),
                    title: chip.title(),
                })
                .collect(),
        },
        Ok(Err(err)) => BoardResponse {
            ok: false,
            message: err.to_string(),
            items: Vec::new(),
        },
        Err(err) => BoardResponse {
            ok: false,
            message: format!("number_board failed: {err}"),
            items: Vec::new(),
        },
    }
}

fn number_hint_at(db_path: &Path, value: &str) -> HintResponse {
    match with_tracker(db_path, |tracker| tracker.input_number_changed(value)) {
        Ok(status) => HintResponse {
            status: status_label(&status).to_string(),
            message: status.hint().unwrap_or_default(),
            is_error: status.is_error(),
        },
        Err(err) => HintResponse {
            status: "invalid".to_string(),
            message: format!("number_hint failed: {err}"),
            is_error: true,
        },
    }
}

fn progress_summary_at(db_path: &Path) -> ProgressResponse {
    match with_tracker(db_path, |tracker| tracker.progress()) {
        Ok(progress) => ProgressResponse {
            ok: true,
            message: String::new(),
            picks: u32::try_from(progress.picks).unwrap_or(u32::MAX),
            remaining: u32::try_from(progress.remaining).unwrap_or(0),
            last_pick: progress
                .last_pick
                .map(|entry| format!("{} → #{}", entry.date_iso(), entry.number)),
            used: progress
                .used
                .iter()
                .map(|entry| format!("#{:03} ({})", entry.number, entry.date_iso()))
                .collect(),
        },
        Err(err) => ProgressResponse {
            ok: false,
            message: format!("progress_summary failed: {err}"),
            picks: 0,
            remaining: 0,
            last_pick: None,
            used: Vec::new(),
        },
    }
}

fn pick_submit_at(db_path: &Path, date: &str, number: &str, confirmed: bool) -> ActionResponse {
    let mut prompt = String::new();
    let result = with_tracker(db_path, |tracker| {
        tracker
            .submit_pick(date, number, &mut |message: &str| {
                prompt = message.to_string();
                confirmed
            })
            .map(|outcome| (outcome, ViewPosition::from(tracker.view())))
    });

    match result {
        Ok(Ok((CommandOutcome::Applied(entry), view))) => ActionResponse::success(
            format!("Locked in #{} for {}.", entry.number, entry.date_iso()),
            Some(view),
        ),
        Ok(Ok((CommandOutcome::Declined, _))) => ActionResponse::confirm(prompt),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call=pick_submit");
            ActionResponse::failure(format!("pick_submit failed: {err}"))
        }
    }
}

fn export_json_at(db_path: &Path) -> ExportResponse {
    match with_tracker(db_path, |tracker| tracker.export_json()) {
        Ok(Ok(content)) => ExportResponse {
            ok: true,
            message: "Export ready.".to_string(),
            file_name: EXPORT_FILE_NAME.to_string(),
            content,
        },
        Ok(Err(err)) => ExportResponse {
            ok: false,
            message: err.to_string(),
            file_name: EXPORT_FILE_NAME.to_string(),
            content: String::new(),
        },
        Err(err) => ExportResponse {
            ok: false,
            message: format!("export_json failed: {err}"),
            file_name: EXPORT_FILE_NAME.to_string(),
            content: String::new(),
        },
    }
}

fn import_json_at(db_path: &Path, content: &str, confirmed: bool) -> ActionResponse {
    let mut prompt = String::new();
    let result = with_tracker(db_path, |tracker| {
        tracker.import(content, &mut |message: &str| {
            prompt = message.to_string();
            confirmed
        })
    });

    match result {
        Ok(Ok(CommandOutcome::Applied(_))) => ActionResponse::success("Import successful.", None),
        Ok(Ok(CommandOutcome::Declined)) => ActionResponse::confirm(prompt),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("import_json failed: {err}")),
    }
}

fn reset_all_at(db_path: &Path, confirmed: bool) -> ActionResponse {
    let mut prompt = String::new();
    let result = with_tracker(db_path, |tracker| {
        tracker.reset_all(&mut |message: &str| {
            prompt = message.to_string();
            confirmed
        })
    });

    match result {
        Ok(Ok(CommandOutcome::Applied(()))) => ActionResponse::success("All picks removed.", None),
        Ok(Ok(CommandOutcome::Declined)) => ActionResponse::confirm(prompt),
        Ok(Err(err)) => ActionResponse::failure(err.to_string()),
        Err(err) => ActionResponse::failure(format!("reset_all failed: {err}")),
    }
}

fn status_label(status: &NumberStatus) -> &'static str {
    match status {
        NumberStatus::Empty => "empty",
        NumberStatus::Invalid => "invalid",
        NumberStatus::Used { .. } => "used",
        NumberStatus::Available(_) => "available",
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| TrackerConfig::resolve(None, None).db_path)
        .clone()
}
