//! Read-only projections over a candidate snapshot.
//!
//! Nothing here holds state or caches results: every view is recomputed from
//! the slice it is handed, so it always reflects the latest mutation.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::candidate::{Candidate, CandidateStatus};

fn arrival_order(a: &Candidate, b: &Candidate) -> Ordering {
    a.arrived_at
        .cmp(&b.arrived_at)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Candidates who have physically arrived, earliest arrival first.
pub fn arrived(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut arrived: Vec<&Candidate> = candidates.iter().filter(|c| c.has_arrived()).collect();
    arrived.sort_by(|a, b| arrival_order(a, b));
    arrived
}

/// The earliest-arrived candidate still waiting to be called.
pub fn next_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates
        .iter()
        .filter(|c| c.has_arrived() && c.status == CandidateStatus::Waiting)
        .min_by(|a, b| arrival_order(a, b))
}

/// Candidates whose attendance has not been decided yet, in registration order.
pub fn pending_attendance(candidates: &[Candidate]) -> Vec<&Candidate> {
    candidates
        .iter()
        .filter(|c| c.awaits_arrival())
        .collect()
}

/// Candidates who have been called, whether or not the interview happened
/// yet. Most recently called first.
pub fn called(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut called: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| matches!(c.status, CandidateStatus::Called | CandidateStatus::Interviewed))
        .collect();
    called.sort_by(|a, b| b.called_at.cmp(&a.called_at).then_with(|| a.id.cmp(&b.id)));
    called
}

/// Candidates with a final outcome (interviewed or no-show), most recent first.
pub fn concluded(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut concluded: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| matches!(c.status, CandidateStatus::Interviewed | CandidateStatus::NoShow))
        .collect();
    concluded.sort_by(|a, b| {
        let a_at = a.called_at.unwrap_or(a.created_at);
        let b_at = b.called_at.unwrap_or(b.created_at);
        b_at.cmp(&a_at).then_with(|| a.id.cmp(&b.id))
    });
    concluded
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub status: Option<CandidateStatus>,
    pub interview_date: Option<NaiveDate>,
}

impl CandidateFilter {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.trim().to_lowercase();
                candidate.name.to_lowercase().contains(&term)
                    || candidate.email.to_lowercase().contains(&term)
            }
            None => true,
        };
        let matches_status = self.status.map_or(true, |s| candidate.status == s);
        let matches_date = self
            .interview_date
            .map_or(true, |d| candidate.interview_date == d);
        matches_search && matches_status && matches_date
    }
}

/// Full list narrowed by `filter`, in registration order.
pub fn filter<'a>(candidates: &'a [Candidate], filter: &CandidateFilter) -> Vec<&'a Candidate> {
    candidates.iter().filter(|c| filter.matches(c)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub total: usize,
    pub waiting: usize,
    pub called: usize,
    pub interviewed: usize,
    pub no_show: usize,
    pub arrived: usize,
    pub pending_attendance: usize,
}

impl QueueStats {
    /// Interviewed share of all registered candidates, as a percentage with
    /// one decimal.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rate = self.interviewed as f64 * 100.0 / self.total as f64;
        (rate * 10.0).round() / 10.0
    }
}

pub fn stats(candidates: &[Candidate]) -> QueueStats {
    let mut stats = QueueStats {
        total: candidates.len(),
        ..QueueStats::default()
    };
    for candidate in candidates {
        match candidate.status {
            CandidateStatus::Waiting => stats.waiting += 1,
            CandidateStatus::Called => stats.called += 1,
            CandidateStatus::Interviewed => stats.interviewed += 1,
            CandidateStatus::NoShow => stats.no_show += 1,
        }
        if candidate.has_arrived() {
            stats.arrived += 1;
        } else if candidate.status != CandidateStatus::NoShow {
            stats.pending_attendance += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
    use uuid::Uuid;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn candidate(name: &str, created: i64) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            interview_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            interview_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            resume_ref: None,
            status: CandidateStatus::Waiting,
            created_at: at(created),
            called_at: None,
            arrived_at: None,
        }
    }

    fn arrived_at(mut c: Candidate, minute: i64) -> Candidate {
        c.arrived_at = Some(at(minute));
        c
    }

    fn names(list: &[&Candidate]) -> Vec<String> {
        list.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn arrived_is_sorted_by_arrival_then_creation() {
        let candidates = vec![
            arrived_at(candidate("Carla", 0), 30),
            candidate("Bruno", 1),
            arrived_at(candidate("Ana", 2), 10),
            arrived_at(candidate("Davi", 3), 30),
        ];
        let list = arrived(&candidates);
        assert_eq!(names(&list), vec!["Ana", "Carla", "Davi"]);
        assert!(list.windows(2).all(|w| w[0].arrived_at <= w[1].arrived_at));
    }

    #[test]
    fn arrival_ties_fall_back_to_id() {
        let mut first = arrived_at(candidate("Ana", 0), 5);
        let mut second = arrived_at(candidate("Ana", 0), 5);
        if first.id > second.id {
            std::mem::swap(&mut first.id, &mut second.id);
        }
        let candidates = vec![second.clone(), first.clone()];
        let list = arrived(&candidates);
        assert_eq!(list[0].id, first.id);
        assert_eq!(next_candidate(&candidates).map(|c| c.id), Some(first.id));
    }

    #[test]
    fn next_candidate_skips_called_and_not_arrived() {
        let mut ana = arrived_at(candidate("Ana", 0), 1);
        ana.status = CandidateStatus::Called;
        ana.called_at = Some(at(2));
        let candidates = vec![
            ana,
            candidate("Bruno", 1),
            arrived_at(candidate("Carla", 2), 8),
            arrived_at(candidate("Davi", 3), 4),
        ];
        assert_eq!(next_candidate(&candidates).map(|c| c.name.as_str()), Some("Davi"));
    }

    #[test]
    fn next_candidate_is_absent_when_nobody_waits() {
        let mut ana = arrived_at(candidate("Ana", 0), 1);
        ana.status = CandidateStatus::Interviewed;
        let candidates = vec![ana, candidate("Bruno", 1)];
        assert!(next_candidate(&candidates).is_none());
        assert!(next_candidate(&[]).is_none());
    }

    #[test]
    fn pending_excludes_arrived_and_no_shows() {
        let mut bruno = candidate("Bruno", 1);
        bruno.status = CandidateStatus::NoShow;
        let mut eva = candidate("Eva", 4);
        eva.status = CandidateStatus::Called;
        let candidates = vec![
            candidate("Ana", 0),
            bruno,
            arrived_at(candidate("Carla", 2), 3),
            eva,
        ];
        assert_eq!(names(&pending_attendance(&candidates)), vec!["Ana", "Eva"]);
    }

    #[test]
    fn called_and_concluded_views() {
        let mut ana = candidate("Ana", 0);
        ana.status = CandidateStatus::Called;
        ana.called_at = Some(at(10));
        let mut bruno = candidate("Bruno", 1);
        bruno.status = CandidateStatus::Interviewed;
        bruno.called_at = Some(at(20));
        let mut carla = candidate("Carla", 2);
        carla.status = CandidateStatus::NoShow;
        let candidates = vec![ana, bruno, carla, candidate("Davi", 3)];

        assert_eq!(names(&called(&candidates)), vec!["Bruno", "Ana"]);
        assert_eq!(names(&concluded(&candidates)), vec!["Bruno", "Carla"]);
    }

    #[test]
    fn filter_by_search_status_and_date() {
        let mut ana = candidate("Ana Lima", 0);
        ana.email = "ana.lima@corp.com".into();
        let mut bruno = candidate("Bruno", 1);
        bruno.status = CandidateStatus::NoShow;
        bruno.interview_date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let candidates = vec![ana, bruno, candidate("Carla", 2)];

        let by_email = CandidateFilter {
            search: Some("CORP".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter(&candidates, &by_email)), vec!["Ana Lima"]);

        let by_status = CandidateFilter {
            status: Some(CandidateStatus::Waiting),
            ..Default::default()
        };
        assert_eq!(names(&filter(&candidates, &by_status)), vec!["Ana Lima", "Carla"]);

        let by_date = CandidateFilter {
            interview_date: NaiveDate::from_ymd_opt(2026, 10, 19),
            ..Default::default()
        };
        assert_eq!(names(&filter(&candidates, &by_date)), vec!["Bruno"]);
    }

    #[test]
    fn stats_count_statuses_and_rate() {
        let mut ana = arrived_at(candidate("Ana", 0), 1);
        ana.status = CandidateStatus::Interviewed;
        let mut bruno = candidate("Bruno", 1);
        bruno.status = CandidateStatus::NoShow;
        let candidates = vec![ana, bruno, candidate("Carla", 2)];

        let stats = stats(&candidates);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.interviewed, 1);
        assert_eq!(stats.no_show, 1);
        assert_eq!(stats.waiting, 1);
        assert_eq!(stats.arrived, 1);
        assert_eq!(stats.pending_attendance, 1);
        assert_eq!(stats.success_rate(), 33.3);
        assert_eq!(QueueStats::default().success_rate(), 0.0);
    }
}
