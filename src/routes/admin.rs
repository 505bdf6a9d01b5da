use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        AdminApplicationListQuery, ApplicationListResponse, ApplicationResponse,
        ApplicationWithJobResponse, UpdateApplicationStatusPayload,
    },
    dto::job_dto::{
        AdminJobListQuery, AdminJobListResponse, CreateJobPayload, JobResponse, UpdateJobPayload,
    },
    error::Result,
    models::job::{Job, JobStatus},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    params(
        ("search" = Option<String>, Query, description = "Substring match on title or company")
    ),
    responses(
        (status = 200, description = "All jobs with per-status counts", body = Json<AdminJobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<AdminJobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.jobs.fetch_all().await?;
    let open_count = jobs.iter().filter(|j| j.status == JobStatus::Open).count();
    let closed_count = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Closed)
        .count();
    let draft_count = jobs.iter().filter(|j| j.status == JobStatus::Draft).count();

    // Counts describe the whole board; the search box only narrows the rows.
    let items: Vec<Job> = match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            jobs.into_iter()
                .filter(|job| {
                    job.title.to_lowercase().contains(&needle)
                        || job.company_name.to_lowercase().contains(&needle)
                })
                .collect()
        }
        _ => jobs,
    };

    let total = items.len();
    Ok(Json(AdminJobListResponse {
        items: items.into_iter().map(Into::into).collect(),
        total,
        open_count,
        closed_count,
        draft_count,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.jobs.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.jobs.fetch_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.jobs.update(id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(
        ("status" = Option<String>, Query, description = "Filter by pipeline status")
    ),
    responses(
        (status = 200, description = "Applications across all jobs, newest first", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<AdminApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.applications.list(query.status).await?;
    let items: Vec<ApplicationWithJobResponse> =
        applications.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApplicationListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationWithJobResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.applications.fetch_by_id(id).await?;
    Ok(Json(ApplicationWithJobResponse::from(application)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .applications
        .update_status(id, payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}
