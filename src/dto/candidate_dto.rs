use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::PersistenceWarning;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::services::candidate_service::Mutation;
use crate::services::queue_service::{CandidateFilter, QueueStats};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCandidatePayload {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(required)]
    #[schema(value_type = Option<String>, format = Date)]
    pub interview_date: Option<NaiveDate>,
    #[validate(required)]
    #[schema(value_type = Option<String>, example = "14:30:00")]
    pub interview_time: Option<NaiveTime>,
    pub resume_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkAttendancePayload {
    pub attended: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
}

impl CandidateListQuery {
    pub fn into_filter(self) -> crate::error::Result<CandidateFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(CandidateStatus::parse(raw).ok_or_else(|| {
                crate::error::Error::BadRequest(format!("Unknown status filter: {}", raw))
            })?),
        };
        Ok(CandidateFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            status,
            interview_date: self.date,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CandidateMutationResponse {
    pub candidate: Candidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<Mutation<Candidate>> for CandidateMutationResponse {
    fn from(mutation: Mutation<Candidate>) -> Self {
        Self {
            candidate: mutation.value,
            warning: mutation.warning.as_ref().map(PersistenceWarning::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CandidateListResponse {
    pub items: Vec<Candidate>,
    pub total: usize,
}

impl From<Vec<Candidate>> for CandidateListResponse {
    fn from(items: Vec<Candidate>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NextCandidateResponse {
    pub candidate: Option<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatsResponse {
    pub total: usize,
    pub waiting: usize,
    pub called: usize,
    pub interviewed: usize,
    pub no_show: usize,
    pub arrived: usize,
    pub pending_attendance: usize,
    pub success_rate: f64,
}

impl From<QueueStats> for QueueStatsResponse {
    fn from(stats: QueueStats) -> Self {
        Self {
            total: stats.total,
            waiting: stats.waiting,
            called: stats.called,
            interviewed: stats.interviewed,
            no_show: stats.no_show,
            arrived: stats.arrived,
            pending_attendance: stats.pending_attendance,
            success_rate: stats.success_rate(),
        }
    }
}
