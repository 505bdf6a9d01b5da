use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{Job, JobStatus, JobType};
use crate::search::criteria::{DatePosted, FilterCriteria, SalaryBucket};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub loc: Option<String>,
    /// Comma-separated job types, e.g. `type=Full-time,Contract`.
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<SalaryBucket>,
    pub posted: Option<DatePosted>,
    pub page: Option<usize>,
}

impl JobSearchQuery {
    pub fn job_types(&self) -> Vec<String> {
        self.job_type
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.q.clone().unwrap_or_default(),
            location: self.loc.clone().unwrap_or_default(),
            job_types: self.job_types(),
            salary: self.salary.unwrap_or_default(),
            posted: self.posted.unwrap_or_default(),
        }
    }

    /// Requested page, lifted to 1. Page numbering is one-based.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecommendedQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminJobListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    pub level: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResponse {
    pub items: Vec<JobResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminJobListResponse {
    pub items: Vec<JobResponse>,
    pub total: usize,
    pub open_count: usize,
    pub closed_count: usize,
    pub draft_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary_range: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub logo_url: Option<String>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub salary_range: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub logo_url: Option<String>,
    pub status: Option<JobStatus>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            title: value.title,
            company_name: value.company_name,
            location: value.location,
            job_type: value.job_type,
            salary_range: value.salary_range,
            status: value.status,
            level: value.level,
            description: value.description,
            tags: value.tags,
            is_featured: value.is_featured,
            logo_url: value.logo_url,
            created_at: value.created_at,
            posted_at: value.posted_at,
        }
    }
}
