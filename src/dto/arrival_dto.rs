use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::arrival::ArrivalSignal;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalSignalPayload {
    #[validate(length(min = 1))]
    pub candidate_name: String,
    /// Defaults to the time the check-in surface's request is received.
    pub arrived_at: Option<DateTime<Utc>>,
}

impl ArrivalSignalPayload {
    pub fn into_signal(self, received_at: DateTime<Utc>) -> ArrivalSignal {
        ArrivalSignal {
            candidate_name: self.candidate_name,
            arrived_at: self.arrived_at.unwrap_or(received_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArrivalQueuedResponse {
    pub queued: bool,
}
