//! Orchestrates a submission: validate, send, classify, commit.
//!
//! Each validated submission takes a fresh request id. A response is only
//! committed to the [`ResultState`] if its id is still the latest issued, so
//! a slow response can never overwrite a newer one.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cratewise_client::client::RecommendClient;
use cratewise_core::query::{Query, QueryRequest, ValidationError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::classify::{classify, Failure};
use crate::notify::{Level, Notice, Notifier};
use crate::state::ResultState;

/// Error returned when an overlap policy name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown overlap policy '{0}', expected 'reject' or 'supersede'")]
pub struct UnknownOverlapPolicy(pub String);

/// What to do with a submission made while another is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Refuse the new submission.
    #[default]
    Reject,
    /// Send the new submission and discard the older response when it lands.
    Supersede,
}

impl FromStr for OverlapPolicy {
    type Err = UnknownOverlapPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "supersede" => Ok(Self::Supersede),
            _ => Err(UnknownOverlapPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reject => "reject",
            Self::Supersede => "supersede",
        })
    }
}

/// How a call to [`Recommender::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The query failed validation; nothing was sent and state is unchanged.
    Rejected(ValidationError),
    /// Another request was in flight under [`OverlapPolicy::Reject`].
    Busy,
    /// A newer submission took over; this response was discarded.
    Superseded,
    /// The final state this submission committed.
    Committed(ResultState),
}

struct Slot {
    state: ResultState,
    latest: u64,
}

/// Owns the [`ResultState`] and drives submissions against a backend.
pub struct Recommender {
    client: Arc<dyn RecommendClient>,
    notifier: Arc<dyn Notifier>,
    policy: OverlapPolicy,
    slot: Mutex<Slot>,
    updates: watch::Sender<ResultState>,
}

impl Recommender {
    /// Create a recommender in the [`ResultState::Idle`] state.
    pub fn new(
        client: Arc<dyn RecommendClient>,
        notifier: Arc<dyn Notifier>,
        policy: OverlapPolicy,
    ) -> Self {
        let (updates, _) = watch::channel(ResultState::Idle);
        Self {
            client,
            notifier,
            policy,
            slot: Mutex::new(Slot {
                state: ResultState::Idle,
                latest: 0,
            }),
            updates,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ResultState {
        self.lock().state.clone()
    }

    /// Receive every state transition as it is committed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResultState> {
        self.updates.subscribe()
    }

    /// Submit `query` with optional `context` and wait for the outcome.
    ///
    /// Failures never escape: they are classified, committed as
    /// [`ResultState::Error`] and raised through the [`Notifier`].
    pub async fn submit(&self, query: &str, context: Option<&str>) -> SubmitOutcome {
        let query = match Query::new(query) {
            Ok(q) => q,
            Err(e) => {
                debug!("rejected submission: {e}");
                self.notifier.notify(&Notice::new(
                    Level::Warning,
                    "Missing description",
                    Failure::from(e.clone()).to_string(),
                ));
                return SubmitOutcome::Rejected(e);
            }
        };

        let Some(id) = self.begin() else {
            self.notifier.notify(&Notice::new(
                Level::Info,
                "Busy",
                "a recommendation request is already in progress",
            ));
            return SubmitOutcome::Busy;
        };
        let mut pending = Pending {
            owner: self,
            id,
            settled: false,
        };

        info!("request #{id}: {query}");
        let request = QueryRequest::new(query, context);
        let outcome = self.client.recommend(&request).await;
        pending.settled = true;

        let (next, failure) = match classify(outcome) {
            Ok(crates) => (ResultState::Success(crates), None),
            Err(failure) => (ResultState::Error(failure.to_string()), Some(failure)),
        };

        if !self.commit(id, next.clone()) {
            debug!("discarding stale response for request #{id}");
            return SubmitOutcome::Superseded;
        }

        match failure {
            Some(failure) => {
                warn!("request #{id} failed: {failure:?}");
                self.notifier.notify(&Notice::new(
                    Level::Error,
                    "Recommendation failed",
                    failure.to_string(),
                ));
            }
            None => info!("request #{id} returned {} crates", next.crates().len()),
        }
        SubmitOutcome::Committed(next)
    }

    /// Enter [`ResultState::Loading`] and issue a request id, unless the
    /// overlap policy refuses.
    fn begin(&self) -> Option<u64> {
        let mut slot = self.lock();
        if slot.state.is_loading() && self.policy == OverlapPolicy::Reject {
            return None;
        }
        slot.latest += 1;
        slot.state = ResultState::Loading;
        self.updates.send_modify(|current| *current = ResultState::Loading);
        Some(slot.latest)
    }

    /// Commit `next` if `id` is still the latest request.
    fn commit(&self, id: u64, next: ResultState) -> bool {
        let mut slot = self.lock();
        if slot.latest != id {
            return false;
        }
        slot.state = next.clone();
        self.updates.send_modify(|current| *current = next);
        true
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the state to idle if a submission is dropped mid-flight.
struct Pending<'a> {
    owner: &'a Recommender,
    id: u64,
    settled: bool,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled && self.owner.commit(self.id, ResultState::Idle) {
            debug!("request #{} abandoned before completion", self.id);
        }
    }
}
