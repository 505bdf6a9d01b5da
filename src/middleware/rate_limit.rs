use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Window {
    opened: Instant,
    served: u32,
}

/// Fixed one-second window shared by every request hitting a router
/// group. One limiter guards one group, so the public and admin sides
/// carry separate budgets.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Arc<Mutex<Window>>,
}

impl RateLimiter {
    fn per_second(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            window: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                served: 0,
            })),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        if now.duration_since(window.opened) >= WINDOW {
            window.opened = now;
            window.served = 0;
        }
        if window.served < self.limit {
            window.served += 1;
            true
        } else {
            false
        }
    }
}

pub fn new_rps_state(rps: u32) -> RateLimiter {
    RateLimiter::per_second(rps)
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.try_acquire() {
        let body = axum::Json(json!({ "error": "Too many requests" }));
        return (StatusCode::TOO_MANY_REQUESTS, [("Retry-After", "1")], body).into_response();
    }
    next.run(req).await
}
