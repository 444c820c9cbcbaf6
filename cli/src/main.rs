//! CLI entrypoint for question-catalog
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use catalog_application::{CatalogEngine, UsageAnalytics};
use catalog_domain::{ConfigIssue, Severity};
use catalog_infrastructure::{
    ConfigLoader, FileConfig, InMemoryDocumentStore, InMemoryUsageStats, JsonlAuditLogger,
};
use catalog_presentation::{AppState, Cli, serve};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // CLI flags override every config source
    if let Some(address) = &cli.address {
        config.server.address = address.clone();
    }
    if let Some(path) = &cli.data_file {
        config.store.data_file = Some(path.clone());
    }

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(&cli, &config)?;

    info!("Starting question-catalog");

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Invalid configuration, see errors above");
    }

    let addr = config
        .server
        .parse_address()
        .0
        .context("server.address is not a socket address")?;
    let (params, _) = config.engine.to_engine_params();

    // === Dependency Injection ===
    let store = match &config.store.data_file {
        Some(path) => InMemoryDocumentStore::open(path.clone()).await?,
        None => InMemoryDocumentStore::new(),
    }
    .with_operation_timeout(config.store.operation_timeout());

    let mut engine = CatalogEngine::new(Arc::new(store), params);
    if let Some(path) = &config.logging.audit_log {
        match JsonlAuditLogger::new(path) {
            Some(logger) => {
                info!("Audit log: {}", logger.path().display());
                engine = engine.with_audit_logger(Arc::new(logger));
            }
            None => warn!("Audit logging disabled"),
        }
    }

    let usage = match &config.analytics.data_file {
        Some(path) => InMemoryUsageStats::load(path).await?,
        None => InMemoryUsageStats::default(),
    };
    let analytics = UsageAnalytics::new(Arc::new(usage))
        .with_active_window_months(config.analytics.active_window_months);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    println!("Question catalog listening on http://{}", listener.local_addr()?);

    let state = AppState::new(Arc::new(engine), Arc::new(analytics));
    serve(listener, state, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging based on verbosity level, with an optional log file.
///
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(cli: &Cli, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let (file_layer, guard) = match &config.logging.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .context("logging.file must name a file")?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
