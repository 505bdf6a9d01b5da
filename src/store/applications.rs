use serde_json::json;
use uuid::Uuid;

use crate::dto::application_dto::SubmitApplicationPayload;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, ApplicationWithJob};
use crate::store::client::DataClient;

/// Columns pulled alongside each application so list and detail views
/// can render the job without a second round trip.
const JOB_SUMMARY_SELECT: &str =
    "*,job:jobs(id,slug,title,company_name,location,type,salary_range)";

#[derive(Clone)]
pub struct ApplicationStore {
    data: DataClient,
}

impl ApplicationStore {
    pub fn new(data: DataClient) -> Self {
        Self { data }
    }

    pub async fn submit(
        &self,
        job_id: Uuid,
        payload: SubmitApplicationPayload,
    ) -> Result<Application> {
        let body = json!({
            "job_id": job_id,
            "user_id": payload.user_id,
            "candidate_name": payload.candidate_name,
            "candidate_email": payload.candidate_email,
            "candidate_phone": payload.candidate_phone,
            "candidate_location": payload.candidate_location,
            "experience_summary": payload.experience_summary,
            "resume_url": payload.resume_url,
            "expected_salary": payload.expected_salary,
            "portfolio_url": payload.portfolio_url,
            "github_url": payload.github_url,
            "linkedin_url": payload.linkedin_url,
            "status": ApplicationStatus::New,
        });
        let request = self.data.post("applications").json(&body);
        let rows: Vec<Application> = self.data.execute(request).await?;
        rows.into_iter().next().ok_or_else(|| {
            Error::Internal("Data API returned no row for submitted application".to_string())
        })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let user_filter = format!("eq.{}", user_id);
        let request = self.data.get("applications").query(&[
            ("select", JOB_SUMMARY_SELECT),
            ("user_id", user_filter.as_str()),
            ("order", "applied_at.desc"),
        ]);
        self.data.execute(request).await
    }

    /// Scoped by both id and owner so one candidate can never read
    /// another's application.
    pub async fn fetch_for_user(&self, user_id: Uuid, id: Uuid) -> Result<ApplicationWithJob> {
        let id_filter = format!("eq.{}", id);
        let user_filter = format!("eq.{}", user_id);
        let request = self.data.get("applications").query(&[
            ("select", JOB_SUMMARY_SELECT),
            ("id", id_filter.as_str()),
            ("user_id", user_filter.as_str()),
        ]);
        let rows: Vec<ApplicationWithJob> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<ApplicationWithJob>> {
        let mut params = vec![
            ("select", JOB_SUMMARY_SELECT.to_string()),
            ("order", "applied_at.desc".to_string()),
        ];
        if let Some(status) = status {
            params.push(("status", format!("eq.{}", status.as_str())));
        }
        let request = self.data.get("applications").query(&params);
        self.data.execute(request).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<ApplicationWithJob> {
        let id_filter = format!("eq.{}", id);
        let request = self
            .data
            .get("applications")
            .query(&[("select", JOB_SUMMARY_SELECT), ("id", id_filter.as_str())]);
        let rows: Vec<ApplicationWithJob> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application> {
        let id_filter = format!("eq.{}", id);
        let request = self
            .data
            .patch("applications")
            .query(&[("id", id_filter.as_str())])
            .json(&json!({ "status": status }));
        let rows: Vec<Application> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        routing::{get, patch, post},
        Json, Router,
    };
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Captured<T> = Arc<Mutex<Option<T>>>;

    async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn store_for(base_url: &str) -> ApplicationStore {
        ApplicationStore::new(DataClient::new(base_url, "test-key").unwrap())
    }

    fn application_row(user_id: Uuid, status: &str, with_job: bool) -> Value {
        let job = if with_job {
            json!({
                "id": Uuid::new_v4(),
                "slug": "senior-rust-engineer-a1b2c",
                "title": "Senior Rust Engineer",
                "company_name": "TechFlow Systems",
                "location": "Remote",
                "type": "Full-time",
                "salary_range": "₹12L - ₹18L",
            })
        } else {
            json!(null)
        };
        json!({
            "id": Uuid::new_v4(),
            "job_id": Uuid::new_v4(),
            "user_id": user_id,
            "candidate_name": "Priya Sharma",
            "candidate_email": "priya@example.com",
            "candidate_phone": "+91 98765 43210",
            "candidate_location": "Pune",
            "experience_summary": "6 years",
            "resume_url": "resumes/priya.pdf",
            "expected_salary": "₹14L",
            "portfolio_url": null,
            "github_url": null,
            "linkedin_url": null,
            "status": status,
            "applied_at": "2025-06-03T09:30:00Z",
            "job": job,
        })
    }

    #[tokio::test]
    async fn submit_posts_the_candidate_with_a_fresh_status() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let user_id = Uuid::new_v4();
        let router = Router::new().route(
            "/rest/v1/applications",
            post(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!([application_row(Uuid::new_v4(), "new", false)]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let payload = SubmitApplicationPayload {
            user_id,
            candidate_name: "Priya Sharma".to_string(),
            candidate_email: "priya@example.com".to_string(),
            candidate_phone: None,
            candidate_location: None,
            experience_summary: Some("6 years".to_string()),
            resume_url: "resumes/priya.pdf".to_string(),
            expected_salary: None,
            portfolio_url: None,
            github_url: None,
            linkedin_url: None,
        };
        let job_id = Uuid::new_v4();
        let application = store_for(&base_url).submit(job_id, payload).await.unwrap();

        assert_eq!(application.status, ApplicationStatus::New);
        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["job_id"], json!(job_id));
        assert_eq!(body["user_id"], json!(user_id));
        assert_eq!(body["status"], "new");
        assert_eq!(body["resume_url"], "resumes/priya.pdf");
    }

    #[tokio::test]
    async fn user_listing_embeds_the_job_and_is_scoped_to_the_owner() {
        let captured: Captured<HashMap<String, String>> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let user_id = Uuid::new_v4();
        let row = application_row(user_id, "review", true);
        let router = Router::new().route(
            "/rest/v1/applications",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorded = recorded.clone();
                let row = row.clone();
                async move {
                    *recorded.lock().unwrap() = Some(params);
                    Json(json!([row]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let applications = store_for(&base_url).list_for_user(user_id).await.unwrap();

        assert_eq!(applications.len(), 1);
        let job = applications[0].job.as_ref().unwrap();
        assert_eq!(job.title, "Senior Rust Engineer");
        let params = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            params.get("user_id").map(String::as_str),
            Some(format!("eq.{}", user_id).as_str())
        );
        assert_eq!(
            params.get("select").map(String::as_str),
            Some(JOB_SUMMARY_SELECT)
        );
        assert_eq!(
            params.get("order").map(String::as_str),
            Some("applied_at.desc")
        );
    }

    #[tokio::test]
    async fn admin_listing_can_narrow_by_status() {
        let captured: Captured<HashMap<String, String>> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/applications",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(params);
                    Json(json!([]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let applications = store_for(&base_url)
            .list(Some(ApplicationStatus::Interview))
            .await
            .unwrap();

        assert!(applications.is_empty());
        let params = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            params.get("status").map(String::as_str),
            Some("eq.interview")
        );
    }

    #[tokio::test]
    async fn fetch_for_user_hides_other_candidates_applications() {
        let router =
            Router::new().route("/rest/v1/applications", get(|| async { Json(json!([])) }));
        let base_url = spawn_stub(router).await;

        let result = store_for(&base_url)
            .fetch_for_user(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn update_status_patches_only_the_status_column() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/applications",
            patch(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!([application_row(Uuid::new_v4(), "interview", false)]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let application = store_for(&base_url)
            .update_status(Uuid::new_v4(), ApplicationStatus::Interview)
            .await
            .unwrap();

        assert_eq!(application.status, ApplicationStatus::Interview);
        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body, json!({ "status": "interview" }));
    }
}
