//! Inline salary editing, one small state machine per record.
//!
//! `Viewing -> Editing -> Saving -> Viewing`, with `Cancel` going straight
//! from `Editing` back to `Viewing`. A row that is absent from the map is
//! `Viewing`. Rows never block each other.

use std::collections::HashMap;

use shared::domain::{format_number, Cat, CatId};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    dashboard::{Dashboard, Outcome},
    form::coerce_number,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Viewing,
    Editing {
        draft: String,
    },
    Saving {
        draft: String,
    },
}

impl RowState {
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Viewing => None,
            Self::Editing { draft } | Self::Saving { draft } => Some(draft),
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing)
    }
}

#[derive(Default)]
pub struct RowEditor {
    rows: Mutex<HashMap<CatId, RowState>>,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self, id: CatId) -> RowState {
        self.rows.lock().await.get(&id).cloned().unwrap_or_default()
    }

    pub async fn states(&self) -> HashMap<CatId, RowState> {
        self.rows.lock().await.clone()
    }

    /// Seeds the draft from the record's salary as it is right now. A reload
    /// that lands while the row is editing does not touch the draft.
    pub async fn begin_edit(&self, cat: &Cat) -> bool {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&cat.id) {
            return false;
        }
        rows.insert(
            cat.id,
            RowState::Editing {
                draft: format_number(cat.salary),
            },
        );
        true
    }

    pub async fn set_draft(&self, id: CatId, value: impl Into<String>) -> bool {
        match self.rows.lock().await.get_mut(&id) {
            Some(RowState::Editing { draft }) => {
                *draft = value.into();
                true
            }
            _ => false,
        }
    }

    pub async fn cancel(&self, id: CatId) -> bool {
        let mut rows = self.rows.lock().await;
        if matches!(rows.get(&id), Some(RowState::Editing { .. })) {
            rows.remove(&id);
            true
        } else {
            false
        }
    }

    /// Sends the draft as exactly one salary update and returns the row to
    /// `Viewing` once it settles, success or not. `None` if the row was not
    /// being edited.
    pub async fn save(&self, id: CatId, dashboard: &Dashboard) -> Option<Outcome> {
        let draft = {
            let mut rows = self.rows.lock().await;
            let Some(RowState::Editing { draft }) = rows.get(&id).cloned() else {
                return None;
            };
            rows.insert(
                id,
                RowState::Saving {
                    draft: draft.clone(),
                },
            );
            draft
        };

        let outcome = dashboard.update_salary(id, coerce_number(&draft)).await;
        debug!("row_edit: save settled id={id} outcome={outcome:?}");
        self.rows.lock().await.remove(&id);
        Some(outcome)
    }

    pub async fn displayed_salary(&self, cat: &Cat) -> String {
        match self.rows.lock().await.get(&cat.id).and_then(RowState::draft) {
            Some(draft) => draft.to_string(),
            None => format_number(cat.salary),
        }
    }

    /// Drops edit state for rows that are no longer in the replica.
    pub async fn forget_missing(&self, records: &[Cat]) {
        self.rows
            .lock()
            .await
            .retain(|id, _| records.iter().any(|cat| cat.id == *id));
    }
}

#[cfg(test)]
#[path = "tests/row_edit_tests.rs"]
mod tests;
