pub mod api;
pub mod error;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::header,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use car_config::Settings;
use car_store::{CarPacker, CommandPacker};
use car_upload::{CarUploader, HttpUploader};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiReply, AppError};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub packer: Arc<dyn CarPacker>,
    pub uploader: Arc<dyn CarUploader>,
}

impl AppState {
    /// Wire the default collaborators: the `ipfs-car` CLI for packing and
    /// the HTTP storage API for uploads.
    pub fn from_settings(settings: Settings) -> Self {
        let packer = Arc::new(CommandPacker::new(settings.pack_bin.clone()));
        let uploader = Arc::new(HttpUploader::new(&settings.storage_endpoint));
        Self { settings: Arc::new(settings), packer, uploader }
    }
}

pub fn app(state: AppState) -> Router {
    let max_body = state.settings.max_body_bytes;
    let timeout = state.settings.request_timeout;
    Router::new()
        .route("/is-alive", get(api::is_alive))
        .route("/generate-car", post(api::generate_car))
        .route("/upload-car", post(api::upload_car))
        .route("/get-cid", post(api::get_cid))
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn(require_json_content_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Middleware: reject POST/PUT/PATCH bodies that are not application/json.
/// Bodyless POSTs pass; `/generate-car` is called without one.
async fn require_json_content_type(req: Request, next: Next) -> Response {
    let needs_json = matches!(req.method().as_str(), "POST" | "PUT" | "PATCH") && has_body(&req);
    if needs_json {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);
        if !is_json {
            return AppError::unsupported_media_type().into_response();
        }
    }
    next.run(req).await
}

fn has_body(req: &Request) -> bool {
    let headers = req.headers();
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(|len| len > 0)
        .unwrap_or(false)
}

pub mod test {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn the server on a random port with the given state. Returns the
    /// address and a JoinHandle that keeps the server alive until dropped.
    pub async fn spawn(state: super::AppState) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let app = super::app(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, handle)
    }
}
