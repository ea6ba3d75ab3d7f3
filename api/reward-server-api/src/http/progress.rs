use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use reward_server_app::{
    domain::{
        LevelId, PlayerId, PlayerLevelId,
        level::{NewPlayerLevel, PlayerLevel},
    },
    workflow::progress::{
        assign_prize::{AssignPrizeError, PrizeAssignment},
        record_result::RecordLevelResultError,
    },
};

use crate::{AppState, ServiceError};

#[derive(serde::Serialize)]
pub struct JsonPlayerLevel {
    id: i64,
    player_id: String,
    level_id: i64,
    completed: String,
    is_completed: bool,
    score: u32,
}

impl From<PlayerLevel> for JsonPlayerLevel {
    fn from(player_level: PlayerLevel) -> Self {
        JsonPlayerLevel {
            id: player_level.id.0,
            player_id: player_level.player_id.0,
            level_id: player_level.level_id.0,
            completed: player_level.completed.format("%Y-%m-%d").to_string(),
            is_completed: player_level.is_completed,
            score: player_level.score,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonRecordResult {
    level_id: i64,
    completed: String,
    is_completed: bool,
    #[serde(default)]
    score: u32,
}

pub async fn record_result(
    Path(player_id): Path<String>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonRecordResult>,
) -> Result<(StatusCode, Json<JsonPlayerLevel>), ServiceError> {
    let completed = NaiveDate::parse_from_str(body.completed.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::BadRequest("Invalid completion date".to_string()))?;
    let result = NewPlayerLevel {
        player_id: PlayerId(player_id),
        level_id: LevelId(body.level_id),
        completed,
        is_completed: body.is_completed,
        score: body.score,
    };
    let player_level = app_state
        .app
        .progress_record_result_use_case
        .record_result(result)
        .await
        .map_err(|e| match e {
            RecordLevelResultError::PlayerOrLevelNotFound => {
                ServiceError::NotFound("Player or level not found".to_string())
            }
            RecordLevelResultError::RepositoryError => {
                ServiceError::Internal("Failed to record level result".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(player_level.into())))
}

#[derive(serde::Serialize)]
pub struct JsonPrizeAssignment {
    status: &'static str,
    message: String,
    received: Option<String>,
}

impl From<PrizeAssignment> for JsonPrizeAssignment {
    fn from(assignment: PrizeAssignment) -> Self {
        let message = assignment.to_string();
        let (status, received) = match assignment {
            PrizeAssignment::LevelNotCompleted { .. } => ("level_not_completed", None),
            PrizeAssignment::NoPrizeConfigured { .. } => ("no_prize", None),
            PrizeAssignment::Granted { received, .. } => ("granted", Some(received.to_rfc3339())),
            PrizeAssignment::AlreadyGranted => ("already_granted", None),
        };
        JsonPrizeAssignment {
            status,
            message,
            received,
        }
    }
}

pub async fn assign_prize(
    Path(player_level_id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<Json<JsonPrizeAssignment>, ServiceError> {
    let assignment = app_state
        .app
        .progress_assign_prize_use_case
        .assign_prize(PlayerLevelId(player_level_id))
        .await
        .map_err(|e| match e {
            AssignPrizeError::PlayerLevelNotFound => ServiceError::NotFound(format!(
                "Player level {} not found",
                player_level_id
            )),
            AssignPrizeError::RepositoryError => {
                ServiceError::Internal("Failed to assign prize".to_string())
            }
        })?;
    Ok(Json(assignment.into()))
}
