use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplicationListResponse, ApplicationWithJobResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/account/{user_id}/applications",
    params(
        ("user_id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate's applications, newest first", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_user_applications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state.applications.list_for_user(user_id).await?;
    let items: Vec<ApplicationWithJobResponse> =
        applications.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApplicationListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/account/{user_id}/applications/{id}",
    params(
        ("user_id" = Uuid, Path, description = "Candidate ID"),
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationWithJobResponse>),
        (status = 404, description = "Application not found for this candidate")
    )
)]
#[axum::debug_handler]
pub async fn get_user_application(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let application = state.applications.fetch_for_user(user_id, id).await?;
    Ok(Json(ApplicationWithJobResponse::from(application)))
}
