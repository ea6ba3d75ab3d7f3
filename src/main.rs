#![recursion_limit = "256"]
use std::sync::Arc;

use log::info;
use reward_persistence_sea_orm::{
    boosts::BoostRepositoryImpl, levels::LevelRepositoryImpl, players::PlayerRepositoryImpl,
    reports::PlayerLevelReportRepositoryImpl,
};
use reward_server_app::{
    ApplicationSettings, DEFAULT_EXPORT_PAGE_SIZE, build_application, ports::clock::SystemClock,
};

use crate::logs::{LogSettings, init_logger};

mod logs;

fn application_settings() -> ApplicationSettings {
    let export_page_size = match std::env::var("EXPORT_PAGE_SIZE") {
        Ok(value) => value
            .parse::<usize>()
            .expect("EXPORT_PAGE_SIZE must be a valid usize"),
        Err(_) => DEFAULT_EXPORT_PAGE_SIZE,
    };
    ApplicationSettings { export_page_size }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_logger(&LogSettings::from_env());

    let player_repo = Arc::new(PlayerRepositoryImpl::new().await);
    let boost_repo = Arc::new(BoostRepositoryImpl::new().await);
    let level_repo = Arc::new(LevelRepositoryImpl::new().await);
    let report_repo = Arc::new(PlayerLevelReportRepositoryImpl::new().await);

    let settings = application_settings();
    info!("Export page size: {}", settings.export_page_size);

    let app = Arc::new(build_application(
        player_repo,
        boost_repo,
        level_repo,
        report_repo,
        Arc::new(SystemClock),
        settings,
    ));

    info!("Starting application");

    let http_app = tokio::spawn(async move {
        reward_server_api::run(app, shutdown_signal()).await;
    });

    if let Err(e) = http_app.await {
        log::error!("HTTP API task failed: {}", e);
    }

    info!("Application shut down");
}
