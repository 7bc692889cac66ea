use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Waiting,
    Called,
    Interviewed,
    NoShow,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Waiting => "waiting",
            CandidateStatus::Called => "called",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::NoShow => "no_show",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "waiting" => Some(CandidateStatus::Waiting),
            "called" => Some(CandidateStatus::Called),
            "interviewed" => Some(CandidateStatus::Interviewed),
            "no_show" | "no-show" => Some(CandidateStatus::NoShow),
            _ => None,
        }
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interview applicant and where they are in the interview day.
///
/// Field names are camelCase on the wire and in the persisted slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub interview_date: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub interview_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_ref: Option<String>,
    pub status: CandidateStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrived_at: Option<DateTime<Utc>>,
}

impl Candidate {
    pub fn has_arrived(&self) -> bool {
        self.arrived_at.is_some()
    }

    /// Not arrived and not already marked absent.
    pub fn awaits_arrival(&self) -> bool {
        !self.has_arrived() && self.status != CandidateStatus::NoShow
    }

    /// Case-insensitive exact comparison used for arrival matching.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}
