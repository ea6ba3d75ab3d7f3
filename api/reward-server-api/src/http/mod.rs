use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use reward_server_app::Application;

use crate::AppState;

mod catalog;
mod export;
mod players;
mod progress;

pub fn router(app: Arc<Application>) -> Router {
    let router: Router<AppState> = Router::new().nest(
        "/v1",
        Router::new()
            .route("/players", post(players::register))
            .route("/players/{player_id}", get(players::get_by_id))
            .route("/players/{player_id}/login", post(players::record_login))
            .route(
                "/players/{player_id}/boosts",
                get(players::list_boosts).post(players::add_boost),
            )
            .route("/players/{player_id}/levels", post(progress::record_result))
            .route("/boosts", post(catalog::create_boost))
            .route("/levels", post(catalog::create_level))
            .route("/prizes", post(catalog::create_prize))
            .route("/levels/{level_id}/prize", post(catalog::attach_prize))
            .route(
                "/player-levels/{player_level_id}/assign-prize",
                post(progress::assign_prize),
            )
            .route("/player-levels/export", get(export::player_levels_csv)),
    );
    router.with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let port = std::env::var("REWARD_HTTP_API_PORT")
        .expect("REWARD_HTTP_API_PORT must be set")
        .parse::<u16>()
        .expect("REWARD_HTTP_API_PORT must be a valid u16");
    let host = std::env::var("REWARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .expect("Failed to bind HTTP API listener");

    info!("API server listening on {}:{}", host, port);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .expect("HTTP API server failed");

    info!("HTTP API shut down gracefully");
}
