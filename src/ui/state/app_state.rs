use dioxus::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::entities::table::Table;
use crate::error::IntakeResult;

/// A load only lands if nothing newer started while it was in flight.
pub fn is_current_load(generation: u64, ticket: u64) -> bool {
    generation == ticket
}

/// What the page knows about the most recent load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadState {
    pub table: Table,
    pub file_name: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    pub generation: u64,
    pub loaded_at: Option<String>,
}

impl LoadState {
    /// Clears the previous result and returns the ticket of the new load.
    pub fn begin(&mut self, file_name: String) -> u64 {
        self.generation += 1;
        info!(file = %file_name, ticket = self.generation, "loading file");
        self.file_name = Some(file_name);
        self.error = None;
        self.table = Table::default();
        self.loaded_at = None;
        self.loading = true;
        self.generation
    }

    /// Applies a finished load. Returns `false` when a newer load has started
    /// since `ticket` was issued; the state is left untouched in that case.
    pub fn finish(&mut self, ticket: u64, result: IntakeResult<Table>) -> bool {
        if !is_current_load(self.generation, ticket) {
            debug!(ticket, generation = self.generation, "dropping result of superseded load");
            return false;
        }
        match result {
            Ok(table) => {
                info!(rows = table.row_count(), "file loaded");
                self.table = table;
                self.loaded_at = Some(chrono::Local::now().format("%H:%M:%S").to_string());
            }
            Err(err) => {
                warn!(error = %err, "file load failed");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn show_results(&self) -> bool {
        self.file_name.is_some() && !self.loading && self.error.is_none()
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub load: Signal<LoadState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            load: use_signal(LoadState::default),
        }
    }

    pub fn begin_load(&mut self, file_name: String) -> u64 {
        self.load.write().begin(file_name)
    }

    pub fn finish_load(&mut self, ticket: u64, result: IntakeResult<Table>) {
        self.load.write().finish(ticket, result);
    }
}
