//! Main web server setup and startup.
//!
//! [`WebServer`] opens the document store, composes the Axum router,
//! registers all routes, and runs the HTTP listener until a shutdown signal
//! arrives.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{
    ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN,
};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use filedocs_store::{DocStore, StoreResult};

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// Value of `Access-Control-Allow-Methods` on every response.
pub const ALLOWED_METHODS: &str = "POST, PUT, GET, OPTIONS, DELETE";

/// Value of `Access-Control-Allow-Headers` on every response.
///
/// Older deployments sent this list with a trailing comma
/// (`"Origin, X-Requested-With, Content-Type, Accept,"`).
pub const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// The filedocs web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server around an already opened store.
    pub fn new(config: WebConfig, store: DocStore) -> Self {
        let state = Arc::new(AppState::new(store));
        Self { config, state }
    }

    /// Open the store at `config.root` and create a server around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage root cannot be created or scanned.
    pub async fn open(config: WebConfig) -> StoreResult<Self> {
        let store = DocStore::open(&config.root).await?;
        Ok(Self::new(config, store))
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!(
            addr = %addr,
            root = %self.config.root.display(),
            "starting web server"
        );

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("web server stopped");
        Ok(())
    }
}

/// Build the API router over `state`.
///
/// Every response, including errors and CORS preflights, gets the fixed
/// allow-origin, allow-methods and allow-headers values. Request bodies are
/// not size-limited.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::PUT,
            Method::GET,
            Method::OPTIONS,
            Method::DELETE,
        ])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
        ]);

    Router::new()
        .route("/api", get(api::ready))
        // Directories.
        .route("/api/dirs", get(api::list_dirs).post(api::create_dir))
        .route("/api/dirs/{dir}", put(api::rename_dir))
        // Documents.
        .route("/api/dirs/{dir}/docs", post(api::create_doc))
        .route(
            "/api/dirs/{dir}/docs/{doc}",
            get(api::read_doc).put(api::update_doc),
        )
        // Documents are arbitrary JSON of any size.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

// ── shutdown ────────────────────────────────────────────────────────

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
