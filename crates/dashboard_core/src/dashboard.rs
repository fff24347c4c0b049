//! Canonical local replica of the cats collection.
//!
//! The [`Dashboard`] owns the records, the loading flags and the error slot.
//! Mutations go through the transport and then reconcile the replica using
//! the strategy the [`ReconciliationPolicy`] picks for that operation.
//! Operations take `&self` and may be interleaved freely; the state lock is
//! never held across a network call.

use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{Cat, CatId},
    protocol::NewCat,
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::{
    notice::ErrorSlot,
    reconcile::{Mutation, ReconciliationPolicy, ReconciliationStrategy},
    row_edit::RowState,
    transport::{CatsTransport, TransportError},
    view::TableView,
};

pub const DELETE_CONFIRMATION: &str = "Delete this cat?";

/// Blocking yes/no question put to the user before destructive actions.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The error slot holds the reason.
    Failed,
    /// The user said no at the confirmation step.
    Declined,
    /// A newer reload started before this one finished; its result was dropped.
    Superseded,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub records: Vec<Cat>,
    pub loading: bool,
    pub pending_create: bool,
    pub error: Option<String>,
}

enum LocalChange {
    Upsert(Cat),
    Remove(CatId),
}

struct DashboardState {
    records: Vec<Cat>,
    loading: bool,
    pending_create: bool,
    reload_generation: u64,
}

pub struct Dashboard {
    transport: Arc<dyn CatsTransport>,
    confirm: Arc<dyn ConfirmPrompt>,
    policy: ReconciliationPolicy,
    inner: Mutex<DashboardState>,
    error: ErrorSlot,
}

impl Dashboard {
    pub fn new(transport: Arc<dyn CatsTransport>, confirm: Arc<dyn ConfirmPrompt>) -> Arc<Self> {
        Self::new_with_policy(transport, confirm, ReconciliationPolicy::default())
    }

    pub fn new_with_policy(
        transport: Arc<dyn CatsTransport>,
        confirm: Arc<dyn ConfirmPrompt>,
        policy: ReconciliationPolicy,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            confirm,
            policy,
            // Nothing has been fetched yet, so the table starts out loading.
            inner: Mutex::new(DashboardState {
                records: Vec::new(),
                loading: true,
                pending_create: false,
                reload_generation: 0,
            }),
            error: ErrorSlot::new(),
        })
    }

    pub fn policy(&self) -> ReconciliationPolicy {
        self.policy
    }

    /// Refetches the whole collection and replaces the replica with it.
    pub async fn reload(&self) -> Outcome {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.loading = true;
            guard.reload_generation += 1;
            guard.reload_generation
        };
        self.error.clear();

        let result = self.transport.list().await;

        let mut guard = self.inner.lock().await;
        if self.policy.discard_stale_reloads && generation != guard.reload_generation {
            debug!(
                "dashboard: dropping stale reload generation={generation} latest={}",
                guard.reload_generation
            );
            return Outcome::Superseded;
        }
        guard.loading = false;
        match result {
            Ok(records) => {
                debug!(
                    "dashboard: reload ok generation={generation} count={}",
                    records.len()
                );
                guard.records = records;
                Outcome::Completed
            }
            Err(err) => {
                drop(guard);
                self.fail("reload", err)
            }
        }
    }

    pub async fn create(&self, payload: NewCat) -> Outcome {
        self.inner.lock().await.pending_create = true;
        self.error.clear();

        let outcome = match self.transport.create(&payload).await {
            Ok(cat) => {
                info!("dashboard: created cat id={} name={}", cat.id, cat.name);
                self.reconcile(Mutation::Create, LocalChange::Upsert(cat)).await;
                Outcome::Completed
            }
            Err(err) => self.fail("create", err),
        };

        self.inner.lock().await.pending_create = false;
        outcome
    }

    pub async fn update_salary(&self, id: CatId, salary: f64) -> Outcome {
        self.error.clear();
        match self.transport.patch_salary(id, salary).await {
            Ok(cat) => {
                info!("dashboard: updated salary id={id} salary={}", cat.salary);
                self.reconcile(Mutation::UpdateSalary, LocalChange::Upsert(cat)).await;
                Outcome::Completed
            }
            Err(err) => self.fail("update_salary", err),
        }
    }

    /// Deletes after confirmation. By default the record is only removed
    /// locally; nothing is refetched.
    pub async fn delete(&self, id: CatId) -> Outcome {
        if !self.confirm.confirm(DELETE_CONFIRMATION) {
            debug!("dashboard: delete declined id={id}");
            return Outcome::Declined;
        }
        self.error.clear();
        match self.transport.delete(id).await {
            Ok(()) => {
                info!("dashboard: deleted cat id={id}");
                self.reconcile(Mutation::Delete, LocalChange::Remove(id)).await;
                Outcome::Completed
            }
            Err(err) => self.fail("delete", err),
        }
    }

    async fn reconcile(&self, mutation: Mutation, change: LocalChange) {
        match self.policy.strategy_for(mutation) {
            ReconciliationStrategy::ReloadAll => {
                let _ = self.reload().await;
            }
            ReconciliationStrategy::LocalPatch => {
                let mut guard = self.inner.lock().await;
                apply_local_change(&mut guard.records, change);
            }
        }
    }

    fn fail(&self, operation: &str, err: TransportError) -> Outcome {
        warn!("dashboard: {operation} failed error={err}");
        self.error.set(err.to_string());
        Outcome::Failed
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let guard = self.inner.lock().await;
        DashboardSnapshot {
            records: guard.records.clone(),
            loading: guard.loading,
            pending_create: guard.pending_create,
            error: self.error.current(),
        }
    }

    pub async fn records(&self) -> Vec<Cat> {
        self.inner.lock().await.records.clone()
    }

    pub async fn record(&self, id: CatId) -> Option<Cat> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .find(|cat| cat.id == id)
            .cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub async fn is_creating(&self) -> bool {
        self.inner.lock().await.pending_create
    }

    pub fn error(&self) -> Option<String> {
        self.error.current()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub async fn table(&self, rows: &HashMap<CatId, RowState>) -> TableView {
        TableView::build(&self.snapshot().await, rows)
    }
}

fn apply_local_change(records: &mut Vec<Cat>, change: LocalChange) {
    match change {
        LocalChange::Upsert(cat) => match records.iter_mut().find(|c| c.id == cat.id) {
            Some(existing) => *existing = cat,
            None => records.push(cat),
        },
        LocalChange::Remove(id) => records.retain(|cat| cat.id != id),
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
