use std::num::NonZeroU32;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use reward_server_app::{
    domain::{
        PlayerId,
        boost::PlayerBoost,
        player::{LoginOutcome, Player},
    },
    workflow::player::{
        add_boost::AddBoostError, get::GetPlayerError, list_boosts::ListBoostsError,
        record_login::RecordLoginError, register::RegisterPlayerError,
    },
};

use crate::{AppState, ServiceError};

#[derive(serde::Serialize)]
pub struct JsonPlayer {
    player_id: String,
    username: String,
    first_login: String,
    last_login: Option<String>,
    points: u32,
}

impl From<Player> for JsonPlayer {
    fn from(player: Player) -> Self {
        JsonPlayer {
            player_id: player.player_id.0,
            username: player.username,
            first_login: player.first_login.to_rfc3339(),
            last_login: player.last_login.map(|t| t.to_rfc3339()),
            points: player.points,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonPlayerBoost {
    player_id: String,
    boost: String,
    quantity: u32,
    boost_add_time: String,
}

impl From<PlayerBoost> for JsonPlayerBoost {
    fn from(row: PlayerBoost) -> Self {
        JsonPlayerBoost {
            player_id: row.player_id.0,
            boost: row.boost_name,
            quantity: row.quantity,
            boost_add_time: row.boost_add_time.to_rfc3339(),
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonRegisterPlayer {
    player_id: String,
    username: String,
}

pub async fn register(
    State(app_state): State<AppState>,
    Json(body): Json<JsonRegisterPlayer>,
) -> Result<(StatusCode, Json<JsonPlayer>), ServiceError> {
    let player = app_state
        .app
        .player_register_use_case
        .register_player(&body.player_id, &body.username)
        .await
        .map_err(|e| match e {
            RegisterPlayerError::InvalidInput(msg) => ServiceError::BadRequest(msg),
            RegisterPlayerError::AlreadyExists => ServiceError::Conflict(format!(
                "Player '{}' or username '{}' already exists",
                body.player_id, body.username
            )),
            RegisterPlayerError::RepositoryError => {
                ServiceError::Internal("Failed to register player".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(player.into())))
}

pub async fn get_by_id(
    Path(player_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonPlayer>, ServiceError> {
    let player_id = PlayerId(player_id);
    let player = app_state
        .app
        .player_get_use_case
        .get_player(&player_id)
        .await
        .map_err(|e| match e {
            GetPlayerError::NotFound => player_not_found(&player_id),
            GetPlayerError::RepositoryError => {
                ServiceError::Internal("Failed to load player".to_string())
            }
        })?;
    Ok(Json(player.into()))
}

#[derive(serde::Deserialize)]
pub struct JsonLogin {
    points: u32,
}

#[derive(serde::Serialize)]
pub struct JsonLoginResponse {
    outcome: &'static str,
    awarded: u32,
    player: JsonPlayer,
}

pub async fn record_login(
    Path(player_id): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonLogin>,
) -> Result<Json<JsonLoginResponse>, ServiceError> {
    let player_id = PlayerId(player_id);
    let record = app_state
        .app
        .player_record_login_use_case
        .record_login(&player_id, body.points)
        .await
        .map_err(|e| match e {
            RecordLoginError::PlayerNotFound => player_not_found(&player_id),
            RecordLoginError::RepositoryError => {
                ServiceError::Internal("Failed to record login".to_string())
            }
        })?;

    let (outcome, awarded) = match record.outcome {
        LoginOutcome::FirstLogin => ("first_login", 0),
        LoginOutcome::StreakContinued { awarded } => ("streak_continued", awarded),
        LoginOutcome::StreakBroken => ("streak_broken", 0),
    };
    Ok(Json(JsonLoginResponse {
        outcome,
        awarded,
        player: record.player.into(),
    }))
}

pub async fn list_boosts(
    Path(player_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<JsonPlayerBoost>>, ServiceError> {
    let player_id = PlayerId(player_id);
    let rows = app_state
        .app
        .player_list_boosts_use_case
        .list_boosts(&player_id)
        .await
        .map_err(|e| match e {
            ListBoostsError::PlayerNotFound => player_not_found(&player_id),
            ListBoostsError::RepositoryError => {
                ServiceError::Internal("Failed to list boosts".to_string())
            }
        })?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[derive(serde::Deserialize)]
pub struct JsonAddBoost {
    boost: String,
    quantity: Option<u32>,
}

pub async fn add_boost(
    Path(player_id): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonAddBoost>,
) -> Result<Json<JsonPlayerBoost>, ServiceError> {
    let quantity = NonZeroU32::new(body.quantity.unwrap_or(1))
        .ok_or_else(|| ServiceError::BadRequest("Quantity must be positive".to_string()))?;
    let player_id = PlayerId(player_id);
    let row = app_state
        .app
        .player_add_boost_use_case
        .add_boost(&player_id, &body.boost, quantity)
        .await
        .map_err(|e| match e {
            AddBoostError::PlayerNotFound => player_not_found(&player_id),
            AddBoostError::BoostNotFound => {
                ServiceError::NotFound(format!("Boost '{}' not found", body.boost))
            }
            AddBoostError::RepositoryError => {
                ServiceError::Internal("Failed to add boost".to_string())
            }
        })?;
    Ok(Json(row.into()))
}

fn player_not_found(player_id: &PlayerId) -> ServiceError {
    ServiceError::NotFound(format!("Player '{}' not found", player_id))
}
