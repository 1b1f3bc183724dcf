//! Shared in-process state: the loaded dataset and the current cross-view
//! ECO selection.

use std::sync::{Arc, RwLock};

use explorer_core::filters::FilterEvent;
use explorer_core::game_record::GameRecord;

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<GameRecord>>,
    selection: Arc<RwLock<Option<FilterEvent>>>,
}

impl AppState {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self {
            records: Arc::new(records),
            selection: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the shared selection wholesale. Every view recomputes from it
    /// on its next request.
    pub fn broadcast(&self, event: FilterEvent) {
        if let Ok(mut selection) = self.selection.write() {
            *selection = Some(event);
        }
    }

    pub fn selection(&self) -> Option<FilterEvent> {
        self.selection.read().ok().and_then(|s| s.clone())
    }

    /// The active ECO category letter, if one is selected.
    pub fn eco_filter(&self) -> Option<char> {
        self.selection()
            .and_then(|event| event.eco_category)
            .and_then(|category| category.chars().next())
    }
}
