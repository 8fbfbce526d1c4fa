//! Axum server setup
//!
//! Server skeleton with:
//! - CORS: named origins, plus any origin unless strict mode is on
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::gateway::AdmissionGateway;

/// Origins always allowed by CORS
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:3000", "https://pytestpage.vercel.app"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Explicitly allowed CORS origins
    pub allowed_origins: Vec<String>,

    /// Restrict CORS to `allowed_origins` (default: false = any origin)
    ///
    /// WARNING: the default mirrors any request origin with credentials.
    /// Turn this on once the frontend origin is fixed.
    pub cors_strict: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            cors_strict: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: AdmissionGateway,
}

impl AppState {
    pub fn new(gateway: AdmissionGateway) -> Self {
        Self { gateway }
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.cors_strict {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "CORS: ignoring invalid origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    } else {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        AllowOrigin::mirror_request()
    };

    // Credentials rule out `*`, so methods and headers are mirrored.
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the application router with all routes
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::admissions::router())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = PostgrestStore::new(GatewayConfig::from_env()?);
/// let state = AppState::new(AdmissionGateway::new(Arc::new(store)));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{StoreError, StudentStore};
    use crate::models::AdmissionRecord;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Echoes the record back as the inserted row and counts calls
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StudentStore for CountingStore {
        async fn insert(
            &self,
            _table: &str,
            record: &AdmissionRecord,
        ) -> Result<Vec<Value>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut row = serde_json::to_value(record).unwrap();
            row["id"] = json!(1);
            Ok(vec![row])
        }
    }

    fn app(store: Arc<CountingStore>, config: &ServerConfig) -> Router {
        build_router(AppState::new(AdmissionGateway::new(store)), config)
    }

    fn post_admission(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/admissions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert!(config.bind_addr.ip().is_loopback());
        assert!(!config.cors_strict);
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = app(Arc::default(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "School Management System API is running - HI zain"})
        );
    }

    #[tokio::test]
    async fn test_create_admission() {
        let store = Arc::new(CountingStore::default());
        let app = app(store.clone(), &ServerConfig::default());

        let response = app
            .oneshot(post_admission(
                r#"{"full_name":"Ali Khan","father_name":"Imran Khan","class_grade":"5"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": true,
                "message": "Student admission created successfully",
                "data": {"id": 1, "full_name": "Ali Khan", "father_name": "Imran Khan", "class_grade": "5"}
            })
        );
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_field_rejected_before_store() {
        let store = Arc::new(CountingStore::default());

        for body in [
            r#"{"father_name":"Imran Khan","class_grade":"5"}"#,
            r#"{"full_name":"Ali Khan","class_grade":"5"}"#,
            r#"{"full_name":"Ali Khan","father_name":"Imran Khan"}"#,
            r#"{"full_name":"Ali Khan","father_name":"Imran Khan","class_grade":5}"#,
            r#"not json"#,
        ] {
            let response = app(store.clone(), &ServerConfig::default())
                .oneshot(post_admission(body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
            assert!(body_json(response).await["detail"].is_array());
        }

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_permissive_cors_mirrors_any_origin() {
        let app = app(Arc::default(), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://anywhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://anywhere.example"
        );
    }

    #[tokio::test]
    async fn test_strict_cors_only_named_origins() {
        let config = ServerConfig {
            cors_strict: true,
            ..ServerConfig::default()
        };

        let response = app(Arc::default(), &config)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://anywhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());

        let response = app(Arc::default(), &config)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_strict_cors_mirrors_extra_origin() {
        let mut config = ServerConfig {
            cors_strict: true,
            ..ServerConfig::default()
        };
        config
            .allowed_origins
            .push("https://admissions.example".to_string());

        let response = app(Arc::default(), &config)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "https://admissions.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://admissions.example"
        );
    }
}
