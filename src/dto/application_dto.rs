use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{
    Application, ApplicationStatus, ApplicationWithJob, JobSummary,
};
use crate::models::job::JobType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitApplicationPayload {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub candidate_name: String,
    #[validate(email)]
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    pub candidate_location: Option<String>,
    pub experience_summary: Option<String>,
    /// Storage path or external link; an application without a resume
    /// is rejected.
    #[validate(length(min = 1))]
    pub resume_url: String,
    pub expected_salary: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminApplicationListQuery {
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    pub candidate_location: Option<String>,
    pub experience_summary: Option<String>,
    pub resume_url: Option<String>,
    pub expected_salary: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummaryResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary_range: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithJobResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub job: Option<JobSummaryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationWithJobResponse>,
    pub total: usize,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            user_id: value.user_id,
            candidate_name: value.candidate_name,
            candidate_email: value.candidate_email,
            candidate_phone: value.candidate_phone,
            candidate_location: value.candidate_location,
            experience_summary: value.experience_summary,
            resume_url: value.resume_url,
            expected_salary: value.expected_salary,
            portfolio_url: value.portfolio_url,
            github_url: value.github_url,
            linkedin_url: value.linkedin_url,
            status: value.status,
            applied_at: value.applied_at,
        }
    }
}

impl From<JobSummary> for JobSummaryResponse {
    fn from(value: JobSummary) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            title: value.title,
            company_name: value.company_name,
            location: value.location,
            job_type: value.job_type,
            salary_range: value.salary_range,
        }
    }
}

impl From<ApplicationWithJob> for ApplicationWithJobResponse {
    fn from(value: ApplicationWithJob) -> Self {
        Self {
            application: value.application.into(),
            job: value.job.map(Into::into),
        }
    }
}
