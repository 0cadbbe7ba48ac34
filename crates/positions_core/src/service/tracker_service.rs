//! Tracker use-case service.
//!
//! One method per shell command. The service is the only owner of the
//! entry store and view state; shells hold a service, not globals.

use crate::clock::Clock;
use crate::codec::{export_document, import_json, to_pretty_json, ExportDocument, ImportError};
use crate::model::entry::Entry;
use crate::repo::document_repo::DocumentRepository;
use crate::repo::entry_store::{EntryStore, StoreError};
use crate::validation::{can_commit, classify_number, NumberStatus, ValidationError};
use crate::view::board::{derive_board, BoardChip};
use crate::view::calendar::{derive_calendar, CalendarGrid};
use crate::view::progress::{derive_progress, ProgressSummary};
use crate::view::state::{NumberFilter, UnknownFilter, ViewState};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const IMPORT_PROMPT: &str = "Import will replace all existing data. Continue?";
const RESET_PROMPT: &str = "Reset ALL data to empty? This cannot be undone.";

/// Human-in-the-loop gate consulted before any mutation.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Result of a confirmed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome<T> {
    Applied(T),
    Declined,
}

#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Import(ImportError),
    Filter(UnknownFilter),
    Store(StoreError),
    Encode(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "Import failed: {err}"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "export encoding failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Filter(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<UnknownFilter> for ServiceError {
    fn from(value: UnknownFilter) -> Self {
        Self::Filter(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Top-level controller: entry store, view state and clock.
pub struct TrackerService<R: DocumentRepository, C: Clock> {
    store: EntryStore<R>,
    view: ViewState,
    clock: C,
}

impl<R: DocumentRepository, C: Clock> TrackerService<R, C> {
    /// Loads (or seeds) the store and starts the view on today's month.
    pub fn open(repo: R, clock: C) -> ServiceResult<Self> {
        let store = EntryStore::open(repo)?;
        let view = ViewState::starting_at(clock.today());
        Ok(Self { store, view, clock })
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn prev_month(&mut self) -> &ViewState {
        self.view.prev_month();
        &self.view
    }

    pub fn next_month(&mut self) -> &ViewState {
        self.view.next_month();
        &self.view
    }

    pub fn jump_to_today(&mut self) -> &ViewState {
        self.view.jump_to_today(self.clock.today());
        &self.view
    }

    /// Shows the month of `year`/zero-based `month`. Out-of-range values
    /// are clamped (see [`ViewState::at`]).
    pub fn show_month(&mut self, year: i32, month: u32) -> &ViewState {
        self.view = ViewState::at(year, month, self.view.number_filter);
        &self.view
    }

    pub fn set_filter(&mut self, filter: NumberFilter) {
        self.view.set_filter(filter);
    }

    /// Parses and applies a shell-provided filter value.
    pub fn change_filter(&mut self, value: &str) -> ServiceResult<NumberFilter> {
        let filter = value.parse::<NumberFilter>()?;
        self.view.set_filter(filter);
        Ok(filter)
    }

    /// Live availability of the number being typed.
    pub fn input_number_changed(&self, raw: &str) -> NumberStatus {
        classify_number(raw, &self.store.indices().by_number)
    }

    /// Selecting a board chip fills the number input with `number`.
    pub fn click_available_number(&self, number: u16) -> NumberStatus {
        self.input_number_changed(&number.to_string())
    }

    /// Validates, confirms and commits one pick.
    ///
    /// The persisted document is re-read before validation so another writer
    /// on the same database is never overwritten from a stale snapshot. On
    /// success the view jumps to the picked date's month.
    pub fn submit_pick(
        &mut self,
        date: &str,
        number: &str,
        confirm: &mut impl Confirm,
    ) -> ServiceResult<CommandOutcome<Entry>> {
        self.store.load()?;
        let entry = match can_commit(date, number, &self.store.indices()) {
            Ok(entry) => entry,
            Err(err) => {
                info!("event=pick_submit module=service status=rejected");
                return Err(err.into());
            }
        };

        let prompt = format!(
            "Lock in #{} for {}? This cannot be edited later.",
            entry.number,
            entry.date_iso()
        );
        if !confirm.confirm(&prompt) {
            info!("event=pick_submit module=service status=declined");
            return Ok(CommandOutcome::Declined);
        }

        self.store.append(entry)?;
        self.view.jump_to_date(entry.date);
        info!("event=pick_submit module=service status=ok");
        Ok(CommandOutcome::Applied(entry))
    }

    /// Export document stamped with the current instant.
    pub fn export(&self) -> ExportDocument {
        export_document(self.store.entries(), self.clock.now())
    }

    /// Pretty-printed export document.
    pub fn export_json(&self) -> ServiceResult<String> {
        let text = to_pretty_json(&self.export()).map_err(ServiceError::Encode)?;
        info!(
            "event=export module=service status=ok entries={}",
            self.store.entries().len()
        );
        Ok(text)
    }

    /// Validates `text` completely, then replaces all entries on confirmation.
    ///
    /// Returns the number of imported entries.
    pub fn import(
        &mut self,
        text: &str,
        confirm: &mut impl Confirm,
    ) -> ServiceResult<CommandOutcome<usize>> {
        let entries = match import_json(text) {
            Ok(entries) => entries,
            Err(err) => {
                info!("event=import module=service status=rejected");
                return Err(err.into());
            }
        };
        if !confirm.confirm(IMPORT_PROMPT) {
            info!("event=import module=service status=declined");
            return Ok(CommandOutcome::Declined);
        }

        let count = entries.len();
        self.store.replace_all(entries)?;
        info!("event=import module=service status=ok entries={count}");
        Ok(CommandOutcome::Applied(count))
    }

    /// Empties the store on confirmation.
    pub fn reset_all(&mut self, confirm: &mut impl Confirm) -> ServiceResult<CommandOutcome<()>> {
        if !confirm.confirm(RESET_PROMPT) {
            info!("event=reset module=service status=declined");
            return Ok(CommandOutcome::Declined);
        }
        self.store.reset()?;
        info!("event=reset module=service status=ok");
        Ok(CommandOutcome::Applied(()))
    }

    /// Grid for the displayed month.
    pub fn calendar(&self) -> Option<CalendarGrid> {
        derive_calendar(
            self.view.year,
            self.view.month,
            self.store.entries(),
            self.clock.today(),
        )
    }

    /// Board chips under the current filter.
    pub fn board(&self) -> Vec<BoardChip> {
        derive_board(self.store.entries(), self.view.number_filter)
    }

    pub fn progress(&self) -> ProgressSummary {
        derive_progress(self.store.entries())
    }
}
