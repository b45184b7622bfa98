//! Relay server
//!
//! Builds the axum router over an injected repository and serves it.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, put};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use shared::{ProcessId, logging, process_info};

use crate::error::{RelayError, RelayResult};
use crate::state::RelayState;
use crate::traits::ResultRepository;
use crate::web::handlers::{
    create_result, delete_result, health_check, list_results, not_found, update_result, websocket_handler,
};

/// Results backend with a realtime change channel
pub struct RelayServer<R>
where
    R: ResultRepository + 'static,
{
    state: Arc<RelayState<R>>,
    allowed_origins: Vec<HeaderValue>,
}

impl<R> RelayServer<R>
where
    R: ResultRepository + 'static,
{
    /// Create a relay over `repository`; with no origins the CORS layer is permissive
    pub fn new(repository: R, allowed_origins: &[String]) -> RelayResult<Self> {
        let allowed_origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| RelayError::ConfigError {
                    field: "allowed_origin".to_string(),
                    value: origin.clone(),
                })
            })
            .collect::<RelayResult<Vec<_>>>()?;

        Ok(Self {
            state: Arc::new(RelayState::new(repository)),
            allowed_origins,
        })
    }

    pub fn state(&self) -> Arc<RelayState<R>> {
        Arc::clone(&self.state)
    }

    fn cors_layer(&self) -> CorsLayer {
        if self.allowed_origins.is_empty() {
            return CorsLayer::permissive();
        }

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.clone()))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }

    /// Build the axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // API routes
            .route("/api", get(list_results::<R>).post(create_result::<R>))
            .route("/api/:id", put(update_result::<R>).delete(delete_result::<R>))
            // WebSocket route
            .route("/ws", get(websocket_handler::<R>))
            // Health check
            .route("/health", get(health_check::<R>))
            .fallback(not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(self.cors_layer())
                    .into_inner(),
            )
            .with_state(self.state())
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn run<F>(&self, addr: SocketAddr, shutdown: F) -> RelayResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|_| RelayError::ServerStartupFailed { addr: addr.to_string() })?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> RelayResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        logging::log_success(ProcessId::current(), &format!("Relay listening on http://{local_addr}"));

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        process_info!(ProcessId::current(), "Relay stopped");
        Ok(())
    }
}
