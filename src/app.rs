//! The axum application.
//!
//! # Examples
//!
//! Greet the world.
//!
//! ```rust
//! # use axum_greet::api::greeting::greeting_api::Message;
//! # tokio_test::block_on(async {
//! # let url = axum_greet::app::spawn_app().await.unwrap();
//! let response = reqwest::get(format!("{}/greet", url)).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(Message::new("Ciao World!".to_string()), response.json::<Message>().await.unwrap());
//! # });
//! ```
//!
//! Change the greeting.
//!
//! ```rust
//! # use axum_greet::api::greeting::greeting_api::Greeting;
//! # tokio_test::block_on(async {
//! # let url = axum_greet::app::spawn_app().await.unwrap();
//! let client = reqwest::Client::new();
//! let response = client.put(format!("{}/greet/greeting/Hola", url)).send().await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!(Greeting::new("Hola".to_string()), response.json::<Greeting>().await.unwrap());
//! # });
//! ```

use std::future::Future;

use crate::infra::config::{Config, ServerConfig};
use crate::infra::error::{not_found, InternalError, PanicHandler};
use crate::infra::extract::Json;
use crate::infra::middleware::{log_request_response, MakeRequestIdSpan};
use crate::infra::openapi::ApiDoc;
use crate::infra::shutdown::shutdown_signal;
use crate::infra::state::AppState;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

/// Where the OpenAPI document is served.
const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Constructs the full axum application.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route(OPENAPI_PATH, get(openapi))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new(OPENAPI_PATH).path("/rapidoc"))
        .merge(crate::api::api(state))
        .fallback(not_found);
    with_layers(router, config)
}

/// Wraps `router` in the middleware stack.
fn with_layers(router: Router, config: &ServerConfig) -> Router {
    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(config.concurrency_limit);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Serves the OpenAPI document.
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Starts the axum server and runs it until ctrl-c or SIGTERM.
pub async fn run_app(listener: TcpListener, config: Config) -> std::io::Result<()> {
    serve(listener, config, shutdown_signal()).await
}

/// Starts the axum server and runs it until `shutdown` completes.
///
/// In-flight requests are finished before returning.
pub async fn serve<F>(listener: TcpListener, config: Config, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::new(&config);
    let app = app(state, &config.server).into_make_service();

    let port = listener.local_addr()?.port();
    tracing::info!("WEB server is up! http://localhost:{}", port);
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("WEB server is DOWN. Good bye!"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server with the default configuration on a random port.
pub async fn spawn_app() -> std::io::Result<String> {
    spawn_app_with_config(Config::default()).await
}

/// Spawn a server with a custom configuration on a random port.
pub async fn spawn_app_with_config(config: Config) -> std::io::Result<String> {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(run_app(listener, config));
    Ok(format!("http://{address}:{port}"))
}
