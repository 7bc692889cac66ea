use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dto::candidate_dto::RegisterCandidatePayload;
use crate::error::{Error, PersistenceWarning, Result};
use crate::models::arrival::ArrivalSignal;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::services::candidate_store::CandidateStore;
use crate::services::queue_service;
use crate::utils::{time, validation};

/// Events that move a registered candidate through the interview day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Call,
    MarkInterviewed,
    MarkNoShow,
    MarkAttendance { attended: bool },
}

impl LifecycleEvent {
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::Call => "call",
            LifecycleEvent::MarkInterviewed => "mark interviewed",
            LifecycleEvent::MarkNoShow => "mark no-show",
            LifecycleEvent::MarkAttendance { .. } => "mark attendance",
        }
    }
}

/// Computes the record that results from `event`, or rejects it.
///
/// The input is never modified; callers store the returned copy.
pub fn apply_transition(
    candidate: &Candidate,
    event: LifecycleEvent,
    now: DateTime<Utc>,
) -> Result<Candidate> {
    use CandidateStatus::*;

    let mut next = candidate.clone();
    match (candidate.status, event) {
        (Waiting, LifecycleEvent::Call) => {
            next.status = Called;
            next.called_at = Some(now);
        }
        (Called, LifecycleEvent::MarkInterviewed) => next.status = Interviewed,
        (Waiting | Called, LifecycleEvent::MarkNoShow) => next.status = NoShow,
        (Waiting, LifecycleEvent::MarkAttendance { attended }) if candidate.arrived_at.is_none() => {
            if attended {
                next.arrived_at = Some(now);
            } else {
                next.status = NoShow;
            }
        }
        (from, event) => {
            return Err(Error::InvalidTransition {
                id: candidate.id,
                from,
                event: event.label(),
            })
        }
    }
    Ok(next)
}

/// A successful mutation plus the persistence warning, if the write failed.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub value: T,
    pub warning: Option<PersistenceWarning>,
}

#[derive(Debug, Clone)]
pub enum ArrivalOutcome {
    Matched(Mutation<Candidate>),
    /// No registered candidate with that name is still awaiting arrival.
    Unmatched,
}

/// The only way candidate records change.
///
/// Clones share one store behind a single lock, so mutations are serialized
/// and each one applies fully or not at all.
#[derive(Clone)]
pub struct CandidateService {
    store: Arc<Mutex<CandidateStore>>,
}

impl CandidateService {
    pub fn new(store: CandidateStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn register(&self, payload: RegisterCandidatePayload) -> Result<Mutation<Candidate>> {
        validation::validate_not_blank(&payload, &[("name", payload.name.as_str())])?;
        let (Some(interview_date), Some(interview_time)) =
            (payload.interview_date, payload.interview_time)
        else {
            return Err(Error::BadRequest("Interview date and time are required".into()));
        };

        let candidate = Candidate {
            id: Uuid::new_v4(),
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: validation::non_blank(payload.phone),
            interview_date,
            interview_time,
            resume_ref: validation::non_blank(payload.resume_ref),
            status: CandidateStatus::Waiting,
            created_at: time::now(),
            called_at: None,
            arrived_at: None,
        };

        let mut store = self.store.lock().await;
        let warning = store.upsert(candidate.clone()).await;
        tracing::info!(candidate_id = %candidate.id, name = %candidate.name, "Candidate registered");
        Ok(Mutation {
            value: candidate,
            warning,
        })
    }

    pub async fn call(&self, id: Uuid) -> Result<Mutation<Candidate>> {
        self.transition(id, LifecycleEvent::Call).await
    }

    pub async fn mark_interviewed(&self, id: Uuid) -> Result<Mutation<Candidate>> {
        self.transition(id, LifecycleEvent::MarkInterviewed).await
    }

    pub async fn mark_no_show(&self, id: Uuid) -> Result<Mutation<Candidate>> {
        self.transition(id, LifecycleEvent::MarkNoShow).await
    }

    pub async fn mark_attendance(&self, id: Uuid, attended: bool) -> Result<Mutation<Candidate>> {
        self.transition(id, LifecycleEvent::MarkAttendance { attended })
            .await
    }

    /// Calls whoever the queue currently recommends. `Ok(None)` when nobody
    /// who has arrived is still waiting.
    pub async fn call_next(&self) -> Result<Option<Mutation<Candidate>>> {
        let mut store = self.store.lock().await;
        let Some(next) = queue_service::next_candidate(store.all()).cloned() else {
            return Ok(None);
        };
        let called = apply_transition(&next, LifecycleEvent::Call, time::now())?;
        let warning = store.upsert(called.clone()).await;
        tracing::info!(candidate_id = %called.id, name = %called.name, "Next candidate called");
        Ok(Some(Mutation {
            value: called,
            warning,
        }))
    }

    /// Stamps `arrivedAt` on the earliest-registered candidate with this name
    /// (case-insensitive) who has not arrived yet and was not marked absent.
    /// Unknown names and repeated signals are no-ops.
    pub async fn record_arrival_signal(&self, signal: ArrivalSignal) -> Result<ArrivalOutcome> {
        let name = signal.candidate_name.trim();
        if name.is_empty() {
            return Ok(ArrivalOutcome::Unmatched);
        }

        let mut store = self.store.lock().await;
        let target = store
            .all()
            .iter()
            .filter(|c| c.awaits_arrival() && c.name_matches(name))
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            .cloned();
        let Some(mut candidate) = target else {
            tracing::debug!(name = %name, "Arrival signal matched no pending candidate");
            return Ok(ArrivalOutcome::Unmatched);
        };

        candidate.arrived_at = Some(signal.arrived_at);
        let warning = store.upsert(candidate.clone()).await;
        tracing::info!(candidate_id = %candidate.id, arrived_at = %signal.arrived_at, "Candidate arrival recorded");
        Ok(ArrivalOutcome::Matched(Mutation {
            value: candidate,
            warning,
        }))
    }

    pub async fn candidates(&self) -> Vec<Candidate> {
        self.store.lock().await.all().to_vec()
    }

    pub async fn candidate(&self, id: Uuid) -> Result<Candidate> {
        self.store
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::candidate_not_found(id))
    }

    async fn transition(&self, id: Uuid, event: LifecycleEvent) -> Result<Mutation<Candidate>> {
        let mut store = self.store.lock().await;
        let current = store.get(id).ok_or_else(|| Error::candidate_not_found(id))?;
        let from = current.status;
        let next = apply_transition(current, event, time::now()).map_err(|e| {
            tracing::warn!(candidate_id = %id, from = %from, event = event.label(), "Rejected transition");
            e
        })?;
        let warning = store.upsert(next.clone()).await;
        tracing::info!(candidate_id = %id, from = %from, to = %next.status, event = event.label(), "Candidate transitioned");
        Ok(Mutation {
            value: next,
            warning,
        })
    }
}
