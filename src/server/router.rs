use crate::server::guards::auth::RequireLogin;
use crate::server::routes::{pages, public, session};
use crate::service::{PageRegistry, PageService};

use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct PagewrightState {
    pub pages: PageService,
    pub registry: PageRegistry,
    pub admin_password: Arc<str>,
    /// Random per-process token carried by the session cookie; restarting logs everyone out.
    pub session_token: Arc<str>,
    pub cookie_key: Key,
    pub insecure_cookie: bool,
}

impl PagewrightState {
    pub fn new(
        pages: PageService,
        registry: PageRegistry,
        admin_password: Arc<str>,
        insecure_cookie: bool,
    ) -> Self {
        Self {
            pages,
            registry,
            admin_password,
            session_token: Arc::from(uuid::Uuid::new_v4().to_string()),
            cookie_key: Key::generate(),
            insecure_cookie,
        }
    }
}

impl FromRef<PagewrightState> for Key {
    fn from_ref(state: &PagewrightState) -> Self {
        state.cookie_key.clone()
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if resp.status().is_server_error() {
        error!(status, %request_id, %method, protocol, %path, latency_ms, %user_agent, "request");
    } else if resp.status().is_client_error() {
        warn!(status, %request_id, %method, protocol, %path, latency_ms, %user_agent, "request");
    } else {
        info!(status, %request_id, %method, protocol, %path, latency_ms, %user_agent, "request");
    }

    resp
}

pub fn pagewright_router(state: PagewrightState) -> Router {
    let admin = pages::router()
        .route("/reload", get(pages::handlers::reload))
        .layer(middleware::from_extractor_with_state::<RequireLogin, _>(
            state.clone(),
        ));

    Router::new()
        .merge(session::router())
        .merge(admin)
        .route("/{path}", get(public::serve_page))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
