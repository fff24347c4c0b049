//! Client-side core of the spy cats dashboard: the transport to the cats
//! service, the local replica and its reconciliation rules, and the form and
//! row-edit controllers that drive it.

pub mod config;
pub mod dashboard;
pub mod form;
pub mod notice;
pub mod reconcile;
pub mod row_edit;
pub mod transport;
pub mod view;

pub use dashboard::{
    AssumeYes, ConfirmPrompt, Dashboard, DashboardSnapshot, Outcome, DELETE_CONFIRMATION,
};
pub use form::{coerce_number, CreationForm};
pub use reconcile::{Mutation, ReconciliationPolicy, ReconciliationStrategy};
pub use row_edit::{RowEditor, RowState};
pub use transport::{CatsTransport, HttpCatsTransport, TransportError};
pub use view::{RowView, TableView};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
