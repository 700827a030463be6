use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::Applicant;

/// Source of the submission timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub action_run_link: String,
    pub email: String,
    pub name: String,
    pub repository_link: String,
    pub resume_link: String,
    pub timestamp: String,
}

impl SubmissionPayload {
    pub fn build(applicant: &Applicant, clock: &dyn Clock) -> Self {
        Self {
            action_run_link: applicant.action_run_link.clone(),
            email: applicant.email.clone(),
            name: applicant.name.clone(),
            repository_link: applicant.repository_link.clone(),
            resume_link: applicant.resume_link.clone(),
            timestamp: format_timestamp(clock.now()),
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`. Sub-millisecond digits are dropped, not rounded.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
