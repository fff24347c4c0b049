//! How the local replica catches up with the service after a mutation.

/// What to do with the replica once a mutation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationStrategy {
    /// Refetch the whole collection; the service is the only source of truth.
    ReloadAll,
    /// Apply the mutation to the replica directly, without another request.
    LocalPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    UpdateSalary,
    Delete,
}

/// Per-operation reconciliation choices plus the optional consistency
/// guarantees.
///
/// The default keeps the dashboard's historical behavior: create and salary
/// updates reload everything, delete trusts the local removal, and reload
/// responses are applied in whatever order they arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationPolicy {
    pub create: ReconciliationStrategy,
    pub update_salary: ReconciliationStrategy,
    pub delete: ReconciliationStrategy,
    /// Drop list responses from reloads that a later reload has superseded.
    pub discard_stale_reloads: bool,
}

impl Default for ReconciliationPolicy {
    fn default() -> Self {
        Self {
            create: ReconciliationStrategy::ReloadAll,
            update_salary: ReconciliationStrategy::ReloadAll,
            delete: ReconciliationStrategy::LocalPatch,
            discard_stale_reloads: false,
        }
    }
}

impl ReconciliationPolicy {
    /// Reload after deletes too, so server-side effects of a delete show up.
    pub fn with_reconciled_deletes(mut self) -> Self {
        self.delete = ReconciliationStrategy::ReloadAll;
        self
    }

    pub fn with_stale_reload_guard(mut self) -> Self {
        self.discard_stale_reloads = true;
        self
    }

    pub fn reconcile_after_delete(&self) -> bool {
        self.delete == ReconciliationStrategy::ReloadAll
    }

    pub fn strategy_for(&self, mutation: Mutation) -> ReconciliationStrategy {
        match mutation {
            Mutation::Create => self.create,
            Mutation::UpdateSalary => self.update_salary,
            Mutation::Delete => self.delete,
        }
    }
}
