use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A check-in notification naming a candidate who is physically on site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalSignal {
    pub candidate_name: String,
    pub arrived_at: DateTime<Utc>,
}
