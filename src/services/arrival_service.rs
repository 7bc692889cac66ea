use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::models::arrival::ArrivalSignal;
use crate::services::candidate_service::{ArrivalOutcome, CandidateService};

/// Sending half of the arrival queue. Cheap to clone into request handlers.
#[derive(Clone)]
pub struct ArrivalInbox {
    sender: mpsc::Sender<ArrivalSignal>,
}

impl ArrivalInbox {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ArrivalSignal>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Fire-and-forget: the signal is matched later by the worker.
    pub async fn submit(&self, signal: ArrivalSignal) -> Result<()> {
        self.sender
            .send(signal)
            .await
            .map_err(|_| Error::Internal("arrival worker is not running".to_string()))
    }
}

/// Drains the arrival queue until every [`ArrivalInbox`] is dropped.
pub async fn run_arrival_worker(
    mut receiver: mpsc::Receiver<ArrivalSignal>,
    candidates: CandidateService,
) {
    while let Some(signal) = receiver.recv().await {
        match candidates.record_arrival_signal(signal.clone()).await {
            Ok(ArrivalOutcome::Matched(mutation)) => {
                if let Some(warning) = mutation.warning {
                    tracing::warn!(candidate_id = %mutation.value.id, %warning, "Arrival recorded in memory only");
                }
            }
            Ok(ArrivalOutcome::Unmatched) => {
                tracing::info!(name = %signal.candidate_name, "Arrival signal ignored, no pending candidate with that name");
            }
            Err(e) => {
                tracing::error!(error = ?e, name = %signal.candidate_name, "Arrival worker error");
            }
        }
    }
    tracing::info!("Arrival worker stopped");
}
