use serde_json::json;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::store::client::DataClient;
use crate::utils::{slug, time};

#[derive(Clone)]
pub struct JobStore {
    data: DataClient,
}

impl JobStore {
    pub fn new(data: DataClient) -> Self {
        Self { data }
    }

    /// Open jobs only, newest first. This is the pool the public search
    /// filters and pages through.
    pub async fn fetch_open(&self) -> Result<Vec<Job>> {
        let request = self.data.get("jobs").query(&[
            ("select", "*"),
            ("status", "eq.open"),
            ("order", "posted_at.desc"),
        ]);
        self.data.execute(request).await
    }

    pub async fn fetch_featured(&self) -> Result<Vec<Job>> {
        let request = self.data.get("jobs").query(&[
            ("select", "*"),
            ("status", "eq.open"),
            ("is_featured", "eq.true"),
            ("order", "posted_at.desc"),
        ]);
        self.data.execute(request).await
    }

    pub async fn fetch_by_slug(&self, slug: &str) -> Result<Job> {
        let slug_filter = format!("eq.{}", slug);
        let request = self
            .data
            .get("jobs")
            .query(&[("select", "*"), ("slug", slug_filter.as_str())]);
        let rows: Vec<Job> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Job '{}' not found", slug)))
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Job> {
        let id_filter = format!("eq.{}", id);
        let request = self
            .data
            .get("jobs")
            .query(&[("select", "*"), ("id", id_filter.as_str())]);
        let rows: Vec<Job> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    /// Every job regardless of status, newest created first. Admin view.
    pub async fn fetch_all(&self) -> Result<Vec<Job>> {
        let request = self
            .data
            .get("jobs")
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.data.execute(request).await
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let status = payload.status.unwrap_or(JobStatus::Draft);
        let posted_at = (status == JobStatus::Open).then(time::now);
        let body = json!({
            "slug": slug::generate_job_slug(&payload.title),
            "title": payload.title,
            "company_name": payload.company_name,
            "location": payload.location,
            "type": payload.job_type,
            "salary_range": payload.salary_range,
            "level": payload.level,
            "description": payload.description,
            "tags": payload.tags,
            "is_featured": payload.is_featured,
            "logo_url": payload.logo_url,
            "status": status,
            "posted_at": posted_at,
        });
        let request = self.data.post("jobs").json(&body);
        let rows: Vec<Job> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Internal("Data API returned no row for created job".to_string()))
    }

    /// Patches only the fields the payload carries. Opening a job for
    /// the first time stamps `posted_at`; re-opening keeps the original
    /// timestamp.
    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let current = self.fetch_by_id(id).await?;

        let mut changes = serde_json::Map::new();
        if let Some(title) = payload.title {
            changes.insert("title".to_string(), json!(title));
        }
        if let Some(company_name) = payload.company_name {
            changes.insert("company_name".to_string(), json!(company_name));
        }
        if let Some(location) = payload.location {
            changes.insert("location".to_string(), json!(location));
        }
        if let Some(job_type) = payload.job_type {
            changes.insert("type".to_string(), json!(job_type));
        }
        if let Some(salary_range) = payload.salary_range {
            changes.insert("salary_range".to_string(), json!(salary_range));
        }
        if let Some(level) = payload.level {
            changes.insert("level".to_string(), json!(level));
        }
        if let Some(description) = payload.description {
            changes.insert("description".to_string(), json!(description));
        }
        if let Some(tags) = payload.tags {
            changes.insert("tags".to_string(), json!(tags));
        }
        if let Some(is_featured) = payload.is_featured {
            changes.insert("is_featured".to_string(), json!(is_featured));
        }
        if let Some(logo_url) = payload.logo_url {
            changes.insert("logo_url".to_string(), json!(logo_url));
        }
        if let Some(status) = payload.status {
            if status == JobStatus::Open && current.posted_at.is_none() {
                changes.insert("posted_at".to_string(), json!(time::now()));
            }
            changes.insert("status".to_string(), json!(status));
        }

        if changes.is_empty() {
            return Ok(current);
        }

        let id_filter = format!("eq.{}", id);
        let request = self
            .data
            .patch("jobs")
            .query(&[("id", id_filter.as_str())])
            .json(&serde_json::Value::Object(changes));
        let rows: Vec<Job> = self.data.execute(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use axum::{
        extract::Query,
        routing::{get, post},
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

    fn store_for(base_url: &str) -> JobStore {
        JobStore::new(DataClient::new(base_url, "test-key").unwrap())
    }

    fn job_row(slug: &str, status: &str, posted_at: Value) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "slug": slug,
            "title": "Senior Rust Engineer",
            "company_name": "TechFlow Systems",
            "location": "Remote",
            "type": "Full-time",
            "salary_range": "₹12L - ₹18L",
            "status": status,
            "level": "Senior",
            "description": "Own the billing pipeline.",
            "tags": ["rust", "backend"],
            "is_featured": false,
            "logo_url": null,
            "created_at": "2025-06-01T10:00:00Z",
            "posted_at": posted_at,
        })
    }

    #[tokio::test]
    async fn fetch_open_filters_by_status_and_orders_by_posting_date() {
        let captured: Captured<HashMap<String, String>> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(params);
                    Json(json!([job_row("senior-rust-engineer-a1b2c", "open", json!("2025-06-02T10:00:00Z"))]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let jobs = store_for(&base_url).fetch_open().await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Open);
        let params = captured.lock().unwrap().clone().unwrap();
        assert_eq!(params.get("status").map(String::as_str), Some("eq.open"));
        assert_eq!(
            params.get("order").map(String::as_str),
            Some("posted_at.desc")
        );
    }

    #[tokio::test]
    async fn every_request_carries_the_api_key_twice() {
        let captured: Captured<(Option<String>, Option<String>)> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            get(move |headers: axum::http::HeaderMap| {
                let recorded = recorded.clone();
                async move {
                    let apikey = headers
                        .get("apikey")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    let bearer = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    *recorded.lock().unwrap() = Some((apikey, bearer));
                    Json(json!([]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let _ = store_for(&base_url).fetch_all().await.unwrap();

        let (apikey, bearer) = captured.lock().unwrap().clone().unwrap();
        assert_eq!(apikey.as_deref(), Some("test-key"));
        assert_eq!(bearer.as_deref(), Some("Bearer test-key"));
    }

    #[tokio::test]
    async fn fetch_by_slug_maps_an_empty_result_to_not_found() {
        let router = Router::new().route("/rest/v1/jobs", get(|| async { Json(json!([])) }));
        let base_url = spawn_stub(router).await;

        let result = store_for(&base_url).fetch_by_slug("missing-role").await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn upstream_failures_surface_as_data_api_errors() {
        let router = Router::new().route(
            "/rest/v1/jobs",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = spawn_stub(router).await;

        let result = store_for(&base_url).fetch_open().await;

        match result {
            Err(Error::DataApi { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected DataApi error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn create_defaults_to_draft_and_generates_a_slug() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            post(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!([job_row("senior-rust-engineer-a1b2c", "draft", json!(null))]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let payload = CreateJobPayload {
            title: "Senior Rust Engineer".to_string(),
            company_name: "TechFlow Systems".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_range: Some("₹12L - ₹18L".to_string()),
            level: None,
            description: None,
            tags: vec![],
            is_featured: false,
            logo_url: None,
            status: None,
        };
        let job = store_for(&base_url).create(payload).await.unwrap();

        assert_eq!(job.status, JobStatus::Draft);
        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["status"], "draft");
        assert!(body["posted_at"].is_null());
        let sent_slug = body["slug"].as_str().unwrap();
        assert!(sent_slug.starts_with("senior-rust-engineer-"));
    }

    #[tokio::test]
    async fn creating_an_already_open_job_stamps_posted_at() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            post(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!([job_row(
                        "designer-x9y8z",
                        "open",
                        json!("2025-06-02T10:00:00Z")
                    )]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let payload = CreateJobPayload {
            title: "Designer".to_string(),
            company_name: "TechFlow Systems".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::Contract,
            salary_range: None,
            level: None,
            description: None,
            tags: vec![],
            is_featured: false,
            logo_url: None,
            status: Some(JobStatus::Open),
        };
        let _ = store_for(&base_url).create(payload).await.unwrap();

        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["status"], "open");
        assert!(body["posted_at"].is_string());
    }

    #[tokio::test]
    async fn opening_a_draft_stamps_posted_at_exactly_once() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            get(|| async { Json(json!([job_row("role-abcde", "draft", json!(null))])) }).patch(
                move |Json(body): Json<Value>| {
                    let recorded = recorded.clone();
                    async move {
                        *recorded.lock().unwrap() = Some(body);
                        Json(json!([job_row(
                            "role-abcde",
                            "open",
                            json!("2025-06-05T08:00:00Z")
                        )]))
                    }
                },
            ),
        );
        let base_url = spawn_stub(router).await;

        let payload = UpdateJobPayload {
            status: Some(JobStatus::Open),
            ..Default::default()
        };
        let job = store_for(&base_url)
            .update(Uuid::new_v4(), payload)
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Open);
        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["status"], "open");
        assert!(body["posted_at"].is_string());
    }

    #[tokio::test]
    async fn reopening_a_job_keeps_its_original_posting_date() {
        let captured: Captured<Value> = Arc::new(Mutex::new(None));
        let recorded = captured.clone();
        let router = Router::new().route(
            "/rest/v1/jobs",
            get(|| async {
                Json(json!([job_row(
                    "role-abcde",
                    "closed",
                    json!("2025-05-01T08:00:00Z")
                )]))
            })
            .patch(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(json!([job_row(
                        "role-abcde",
                        "open",
                        json!("2025-05-01T08:00:00Z")
                    )]))
                }
            }),
        );
        let base_url = spawn_stub(router).await;

        let payload = UpdateJobPayload {
            status: Some(JobStatus::Open),
            ..Default::default()
        };
        let _ = store_for(&base_url)
            .update(Uuid::new_v4(), payload)
            .await
            .unwrap();

        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["status"], "open");
        assert!(body.get("posted_at").is_none());
    }
}
