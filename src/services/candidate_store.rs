use std::sync::Arc;

use uuid::Uuid;

use crate::database::kv::KeyValueStore;
use crate::error::PersistenceWarning;
use crate::models::candidate::Candidate;

/// Authoritative, insertion-ordered set of candidates mirrored to a key-value slot.
pub struct CandidateStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    candidates: Vec<Candidate>,
}

impl CandidateStore {
    /// Restores the set persisted under `key`. Missing or unreadable content
    /// yields an empty store; this never fails.
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let candidates = match kv.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<Candidate>>(value) {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Persisted candidates are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Could not read persisted candidates, starting empty");
                Vec::new()
            }
        };
        tracing::info!(key = %key, count = candidates.len(), "Candidate store loaded");
        Self { kv, key, candidates }
    }

    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: Uuid) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Replaces the candidate with the same id or appends it, then persists
    /// the whole set.
    pub async fn upsert(&mut self, candidate: Candidate) -> Option<PersistenceWarning> {
        match self.candidates.iter_mut().find(|c| c.id == candidate.id) {
            Some(existing) => *existing = candidate,
            None => self.candidates.push(candidate),
        }
        self.save().await
    }

    pub async fn save(&self) -> Option<PersistenceWarning> {
        let snapshot = match serde_json::to_value(&self.candidates) {
            Ok(value) => value,
            Err(e) => return Some(report(PersistenceWarning::new("encode", e))),
        };
        match self.kv.put(&self.key, &snapshot).await {
            Ok(()) => None,
            Err(e) => Some(report(PersistenceWarning::new("write", e))),
        }
    }
}

fn report(warning: PersistenceWarning) -> PersistenceWarning {
    tracing::warn!(operation = warning.operation, error = %warning.message, "Candidate store persistence failed");
    warning
}
