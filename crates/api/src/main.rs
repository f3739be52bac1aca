use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vfe_api::config::ServerConfig;
use vfe_api::router::build_app_router;
use vfe_api::state::AppState;
use vfe_api::{background, bootstrap};
use vfe_scanner::Reconciler;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vfe_api=debug,vfe_scanner=info,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage_root = %config.storage_root.display(),
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = vfe_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    vfe_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vfe_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin seeding ---
    if let Some(password) = config.bootstrap_admin_password.as_deref() {
        match bootstrap::ensure_admin(&pool, password).await {
            Ok(Some(user)) => tracing::info!(user_id = user.id, "Bootstrap admin created"),
            Ok(None) => tracing::debug!("Bootstrap admin already present"),
            Err(e) => tracing::error!(error = %e, "Failed to seed bootstrap admin"),
        }
    }

    // --- Initial reconciliation (before the listener binds) ---
    std::fs::create_dir_all(&config.storage_root).expect("Failed to create storage root");
    let reconciler = Arc::new(Reconciler::new(pool.clone(), config.storage_root.clone()));
    if let Err(e) = reconciler.run().await {
        tracing::error!(error = %e, "Initial storage reconciliation failed");
    }

    // --- Periodic re-scan ---
    let rescan_cancel = CancellationToken::new();
    let rescan_handle = config.scan_interval_secs.map(|secs| {
        tokio::spawn(background::rescan::run(
            Arc::clone(&reconciler),
            Duration::from_secs(secs),
            rescan_cancel.clone(),
        ))
    });

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        reconciler,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    rescan_cancel.cancel();
    if let Some(handle) = rescan_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Periodic re-scan stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
