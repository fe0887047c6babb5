//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: storage, the pet cache and its
//! sweeper, the REST API, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{InMemoryStorage, PetTimedCache};
use crate::interfaces::{create_api_router, AppState};
use crate::shared::{listen_for_shutdown_signals, ShutdownSignal};

/// Handle to a running vet clinic service.
///
/// ```rust,no_run
/// use vet_clinic::config::AppConfig;
/// use vet_clinic::server::ServerHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Pet cache shared by the handlers.
    pub cache: Arc<PetTimedCache>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownSignal,
    api_task: JoinHandle<()>,
    sweeper_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Build the service graph and start serving.
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;
        info!(
            calculator = %config.pricing.calculator,
            base_charge = config.pricing.base_charge,
            price_per_pet = config.pricing.price_per_pet,
            "Starting vet clinic service"
        );

        // ── Storage & cache ────────────────────────────────────
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStorage::new());
        let cache = Arc::new(PetTimedCache::new(repos.clone(), config.cache.pet_ttl()));
        info!(
            ttl_secs = config.cache.pet_ttl_seconds,
            sweep_secs = config.cache.sweep_interval_seconds,
            "Pet cache initialized"
        );

        let shutdown = ShutdownSignal::new();
        let sweeper_task = cache.spawn_sweeper(config.cache.sweep_interval(), shutdown.clone());

        // ── REST API server ────────────────────────────────────
        let state = AppState::new(repos.clone(), cache.clone(), &config.pricing);
        let router = create_api_router(state);

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            cache,
            config,
            local_addr,
            shutdown,
            api_task,
            sweeper_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM or SIGINT.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Send the shutdown signal without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for every task to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        let api_task = self.api_task;
        let sweeper_task = self.sweeper_task;

        let finished = self
            .shutdown
            .shutdown_with_cleanup(timeout, || async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                if let Err(e) = sweeper_task.await {
                    error!("Pet cache sweeper panicked: {}", e);
                }
            })
            .await;

        if !finished {
            warn!("Some tasks were still running when the shutdown timeout elapsed");
        }
        info!("Vet clinic service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down vet clinic service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the logging config; `RUST_LOG` wins when set.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
