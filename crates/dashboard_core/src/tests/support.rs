//! In-memory stand-ins for the cats service and the confirmation prompt.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{Cat, CatId},
    protocol::NewCat,
};
use tokio::sync::Mutex;

use crate::{
    dashboard::{ConfirmPrompt, Dashboard},
    reconcile::ReconciliationPolicy,
    transport::{CatsTransport, TransportError, TransportResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    List,
    Create,
    Patch,
    Delete,
}

#[derive(Default)]
struct FakeState {
    cats: Vec<Cat>,
    next_id: i64,
    calls: HashMap<Op, usize>,
    failures: HashMap<Op, VecDeque<TransportError>>,
    delays: HashMap<Op, Duration>,
    list_delays: VecDeque<Duration>,
    patched: Vec<(CatId, f64)>,
}

/// Behaves like the cats service: assigns ids, applies mutations on arrival
/// and answers after an optional delay.
#[derive(Default)]
pub(crate) struct FakeCatsTransport {
    state: Mutex<FakeState>,
}

impl FakeCatsTransport {
    pub(crate) fn with_cats(cats: Vec<Cat>) -> Arc<Self> {
        let next_id = cats.iter().map(|cat| cat.id.0).max().unwrap_or(0);
        Arc::new(Self {
            state: Mutex::new(FakeState {
                cats,
                next_id,
                ..FakeState::default()
            }),
        })
    }

    pub(crate) async fn calls(&self, op: Op) -> usize {
        self.state.lock().await.calls.get(&op).copied().unwrap_or(0)
    }

    pub(crate) async fn total_calls(&self) -> usize {
        self.state.lock().await.calls.values().sum()
    }

    pub(crate) async fn patched(&self) -> Vec<(CatId, f64)> {
        self.state.lock().await.patched.clone()
    }

    pub(crate) async fn server_cats(&self) -> Vec<Cat> {
        self.state.lock().await.cats.clone()
    }

    pub(crate) async fn insert_server_side(&self, cat: Cat) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(cat.id.0);
        state.cats.push(cat);
    }

    pub(crate) async fn fail_next(&self, op: Op, status: u16, message: &str) {
        self.state
            .lock()
            .await
            .failures
            .entry(op)
            .or_default()
            .push_back(TransportError::Status {
                status,
                message: message.to_string(),
            });
    }

    pub(crate) async fn set_delay(&self, op: Op, delay: Duration) {
        self.state.lock().await.delays.insert(op, delay);
    }

    /// Delay for the next list call only; takes precedence over `set_delay`.
    pub(crate) async fn push_list_delay(&self, delay: Duration) {
        self.state.lock().await.list_delays.push_back(delay);
    }

    async fn begin(&self, op: Op) -> Result<Duration, TransportError> {
        let mut state = self.state.lock().await;
        *state.calls.entry(op).or_default() += 1;
        let delay = match op {
            Op::List => state.list_delays.pop_front(),
            _ => None,
        }
        .or_else(|| state.delays.get(&op).copied())
        .unwrap_or_default();
        match state.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(delay),
        }
    }
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn not_found() -> TransportError {
    TransportError::Status {
        status: 404,
        message: "Cat not found".to_string(),
    }
}

#[async_trait]
impl CatsTransport for FakeCatsTransport {
    async fn list(&self) -> TransportResult<Vec<Cat>> {
        let delay = self.begin(Op::List).await?;
        // Snapshot on arrival so a slow response can carry stale data.
        let cats = self.state.lock().await.cats.clone();
        settle(delay).await;
        Ok(cats)
    }

    async fn create(&self, payload: &NewCat) -> TransportResult<Cat> {
        let delay = self.begin(Op::Create).await?;
        let cat = {
            let mut state = self.state.lock().await;
            state.next_id += 1;
            let cat = Cat {
                id: CatId(state.next_id),
                name: payload.name.clone(),
                years_of_experience: payload.years_of_experience as u32,
                breed: payload.breed.clone(),
                salary: payload.salary,
            };
            state.cats.push(cat.clone());
            cat
        };
        settle(delay).await;
        Ok(cat)
    }

    async fn patch_salary(&self, id: CatId, salary: f64) -> TransportResult<Cat> {
        let delay = self.begin(Op::Patch).await?;
        let updated = {
            let mut state = self.state.lock().await;
            state.patched.push((id, salary));
            let cat = state
                .cats
                .iter_mut()
                .find(|cat| cat.id == id)
                .ok_or_else(not_found)?;
            cat.salary = salary;
            cat.clone()
        };
        settle(delay).await;
        Ok(updated)
    }

    async fn delete(&self, id: CatId) -> TransportResult<()> {
        let delay = self.begin(Op::Delete).await?;
        {
            let mut state = self.state.lock().await;
            let before = state.cats.len();
            state.cats.retain(|cat| cat.id != id);
            if state.cats.len() == before {
                return Err(not_found());
            }
        }
        settle(delay).await;
        Ok(())
    }
}

/// Answers every confirmation with a fixed reply and counts the questions.
pub(crate) struct FixedConfirm {
    answer: bool,
    asked: AtomicUsize,
}

impl FixedConfirm {
    pub(crate) fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: AtomicUsize::new(0),
        })
    }

    pub(crate) fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmPrompt for FixedConfirm {
    fn confirm(&self, message: &str) -> bool {
        assert_eq!(message, crate::dashboard::DELETE_CONFIRMATION);
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub(crate) fn cat(id: i64, name: &str, salary: f64) -> Cat {
    Cat {
        id: CatId(id),
        name: name.to_string(),
        years_of_experience: 3,
        breed: "Bengal".to_string(),
        salary,
    }
}

/// A dashboard over `cats` that has already completed its first reload.
pub(crate) async fn loaded_dashboard(
    cats: Vec<Cat>,
    policy: ReconciliationPolicy,
) -> (Arc<Dashboard>, Arc<FakeCatsTransport>) {
    let transport = FakeCatsTransport::with_cats(cats);
    let dashboard =
        Dashboard::new_with_policy(transport.clone(), FixedConfirm::new(true), policy);
    dashboard.reload().await;
    (dashboard, transport)
}
