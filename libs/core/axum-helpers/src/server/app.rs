use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found, request_timeout_body};
use axum::http::StatusCode;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::{Listen, ServerConfig};
use std::future::Future;
use std::io;
use std::path::Path;
use std::time::Duration;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Path the OpenAPI document is served on
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Upper bound on post-shutdown cleanup in [`create_production_app`]
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - The OpenAPI document for `T` at [`OPENAPI_PATH`]
/// - The given API routes, merged at the root
/// - 404 and 405 fallbacks in the standard error body
/// - Request tracing
/// - The request body read timeout and the whole-request timeout from
///   `server_config` (408 with the standard error body when exceeded)
///
/// Health endpoints are added by the app with `health_router()` and its own
/// readiness handler.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/example", get(handler))
///     .with_state(my_state);
///
/// let router = create_router::<ApiDoc>(api_routes, &ServerConfig::default());
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .route(OPENAPI_PATH, get(|| async { Json(T::openapi()) }))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server_config.write_timeout,
        ))
        .layer(middleware::map_response(request_timeout_body))
        .layer(RequestBodyTimeoutLayer::new(server_config.read_timeout))
}

/// Starts the Axum server with graceful shutdown on SIGINT/SIGTERM.
///
/// # Errors
/// Returns an error if:
/// - The listener fails to bind to the configured address or socket path
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    serve_until(router, server_config, shutdown_signal()).await
}

/// Production server: graceful shutdown followed by bounded cleanup.
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests drain,
/// then `cleanup` runs for at most `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::{create_production_app, DEFAULT_SHUTDOWN_TIMEOUT};
///
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config, DEFAULT_SHUTDOWN_TIMEOUT, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let serve_result = serve_until(router, server_config, shutdown_signal()).await;

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

/// Serve `router` on the configured listener until `shutdown` resolves.
///
/// For Unix sockets a stale socket file is removed before binding and the
/// file is removed again once the server stops.
pub async fn serve_until<F>(router: Router, server_config: &ServerConfig, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let result = match &server_config.listen {
        Listen::Tcp { host, port } => {
            let listener = tokio::net::TcpListener::bind((host.as_str(), *port)).await?;
            info!("Server starting on {}", listener.local_addr()?);

            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown)
                .await
        }
        #[cfg(unix)]
        Listen::Unix(path) => {
            remove_socket_file(path)?;
            let listener = tokio::net::UnixListener::bind(path)?;
            info!("Server starting on unix socket {}", path.display());

            let result = axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown)
                .await;

            if let Err(e) = remove_socket_file(path) {
                warn!("Failed to remove socket file {}: {}", path.display(), e);
            }
            result
        }
        #[cfg(not(unix))]
        Listen::Unix(path) => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("unix sockets are not supported here: {}", path.display()),
        )),
    };

    result.inspect_err(|e| {
        tracing::error!("Server encountered an error: {:?}", e);
    })
}

/// Remove a socket file if present; a missing file is not an error.
fn remove_socket_file(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!("Removed socket file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API"))]
    struct TestDoc;

    fn test_router() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        create_router::<TestDoc>(apis, &ServerConfig::default())
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_serves_openapi_document() {
        let (status, body) = send(test_router(), "GET", OPENAPI_PATH).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Test API");
    }

    #[tokio::test]
    async fn test_unknown_route_is_structured_404() {
        let (status, body) = send(test_router(), "GET", "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["developerMessage"], "no route for /nope");
    }

    #[tokio::test]
    async fn test_wrong_method_is_structured_405() {
        let (status, body) = send(test_router(), "DELETE", "/ping").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_slow_handler_is_structured_408() {
        let apis = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let config = ServerConfig {
            write_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let router = create_router::<TestDoc>(apis, &config);

        let (status, body) = send(router, "GET", "/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
        assert_eq!(body["message"], "Request timed out");
    }

    #[test]
    fn test_remove_socket_file_tolerates_missing() {
        let path = std::env::temp_dir().join(format!("missing-{}.sock", std::process::id()));
        assert!(remove_socket_file(&path).is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unix_socket_serves_and_cleans_up() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let path = std::env::temp_dir().join(format!("axum-helpers-{}.sock", std::process::id()));
        // A stale file from a previous run must not prevent binding
        std::fs::write(&path, b"stale").unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let config = ServerConfig::unix(&path);
        let server = tokio::spawn(async move {
            serve_until(test_router(), &config, async {
                rx.await.ok();
            })
            .await
        });

        let mut stream = loop {
            match tokio::net::UnixStream::connect(&path).await {
                Ok(stream) => break stream,
                Err(_) => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        };
        stream
            .write_all(b"GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("pong"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert!(!path.exists());
    }
}
