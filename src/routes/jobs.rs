use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use rand::{seq::SliceRandom, thread_rng};
use validator::Validate;

use crate::{
    dto::application_dto::SubmitApplicationPayload,
    dto::job_dto::{
        JobListResponse, JobResponse, JobSearchQuery, JobSearchResponse, RecommendedQuery,
    },
    error::{Error, Result},
    models::job::JobStatus,
    search::filter::filter_jobs,
    search::pager::{paginate, PAGE_SIZE},
    utils::time,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/jobs",
    params(
        ("q" = Option<String>, Query, description = "Text search over title, company and tags"),
        ("loc" = Option<String>, Query, description = "Location substring"),
        ("type" = Option<String>, Query, description = "Comma-separated job types"),
        ("salary" = Option<String>, Query, description = "Salary band, e.g. 6-10L"),
        ("posted" = Option<String>, Query, description = "Recency window: any, 24h, week or month"),
        ("page" = Option<usize>, Query, description = "One-based page number")
    ),
    responses(
        (status = 200, description = "Filtered page of open jobs", body = Json<JobSearchResponse>)
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.jobs.fetch_open().await?;
    let filtered = filter_jobs(&jobs, &query.criteria(), time::now());
    let total = filtered.len();
    let page = query.page();
    let result = paginate(&filtered, PAGE_SIZE, page);
    Ok(Json(JobSearchResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page: PAGE_SIZE,
        total_pages: result.total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/featured",
    responses(
        (status = 200, description = "Open jobs flagged for the landing page", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_featured_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.jobs.fetch_featured().await?;
    Ok(Json(JobListResponse {
        items: jobs.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/recommended",
    params(
        ("limit" = Option<usize>, Query, description = "Number of picks, default 2")
    ),
    responses(
        (status = 200, description = "Random sample of open jobs", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_recommended_jobs(
    State(state): State<AppState>,
    Query(query): Query<RecommendedQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(2).clamp(1, 10);
    let mut jobs = state.jobs.fetch_open().await?;
    jobs.shuffle(&mut thread_rng());
    jobs.truncate(limit);
    Ok(Json(JobListResponse {
        items: jobs.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/{slug}",
    params(
        ("slug" = String, Path, description = "Job slug")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found or not open")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let job = state.jobs.fetch_by_slug(&slug).await?;
    // Drafts and closed listings are invisible to the public side.
    if job.status != JobStatus::Open {
        return Err(Error::NotFound(format!("Job '{}' not found", slug)));
    }
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/public/jobs/{slug}/apply",
    params(
        ("slug" = String, Path, description = "Job slug")
    ),
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<crate::dto::application_dto::ApplicationResponse>),
        (status = 400, description = "Invalid payload or job not accepting applications"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.jobs.fetch_by_slug(&slug).await?;
    if job.status != JobStatus::Open {
        return Err(Error::BadRequest(
            "This job is not accepting applications".to_string(),
        ));
    }
    let application = state.applications.submit(job.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(crate::dto::application_dto::ApplicationResponse::from(
            application,
        )),
    ))
}
