use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use reward_server_app::{
    domain::{
        LevelId, PrizeId,
        boost::{Boost, BoostType},
        level::{Level, LevelPrize, Prize},
    },
    workflow::catalog::{
        attach_prize::AttachPrizeError, create_boost::CreateBoostError,
        create_level::CreateLevelError, create_prize::CreatePrizeError,
    },
};

use crate::{AppState, ServiceError};

#[derive(serde::Serialize)]
pub struct JsonBoost {
    name: String,
    boost_type: &'static str,
    description: Option<String>,
}

impl From<Boost> for JsonBoost {
    fn from(boost: Boost) -> Self {
        JsonBoost {
            name: boost.name,
            boost_type: boost.boost_type.as_str(),
            description: boost.description,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonLevel {
    id: i64,
    title: String,
    order: i32,
}

impl From<Level> for JsonLevel {
    fn from(level: Level) -> Self {
        JsonLevel {
            id: level.id.0,
            title: level.title,
            order: level.order,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonPrize {
    id: i64,
    title: String,
}

impl From<Prize> for JsonPrize {
    fn from(prize: Prize) -> Self {
        JsonPrize {
            id: prize.id.0,
            title: prize.title,
        }
    }
}

#[derive(serde::Serialize)]
pub struct JsonLevelPrize {
    id: i64,
    level_id: i64,
    prize_id: i64,
    received: Option<String>,
}

impl From<LevelPrize> for JsonLevelPrize {
    fn from(level_prize: LevelPrize) -> Self {
        JsonLevelPrize {
            id: level_prize.id.0,
            level_id: level_prize.level_id.0,
            prize_id: level_prize.prize_id.0,
            received: level_prize.received.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(serde::Deserialize)]
pub struct JsonCreateBoost {
    name: String,
    boost_type: String,
    description: Option<String>,
}

pub async fn create_boost(
    State(app_state): State<AppState>,
    Json(body): Json<JsonCreateBoost>,
) -> Result<(StatusCode, Json<JsonBoost>), ServiceError> {
    let boost_type = BoostType::from_str(body.boost_type.trim())
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;
    let boost = app_state
        .app
        .catalog_create_boost_use_case
        .create_boost(&body.name, boost_type, body.description)
        .await
        .map_err(|e| match e {
            CreateBoostError::InvalidName => {
                ServiceError::BadRequest("Invalid boost name".to_string())
            }
            CreateBoostError::AlreadyExists => {
                ServiceError::Conflict(format!("Boost '{}' already exists", body.name))
            }
            CreateBoostError::RepositoryError => {
                ServiceError::Internal("Failed to create boost".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(boost.into())))
}

#[derive(serde::Deserialize)]
pub struct JsonCreateLevel {
    title: String,
    #[serde(default)]
    order: i32,
}

pub async fn create_level(
    State(app_state): State<AppState>,
    Json(body): Json<JsonCreateLevel>,
) -> Result<(StatusCode, Json<JsonLevel>), ServiceError> {
    let level = app_state
        .app
        .catalog_create_level_use_case
        .create_level(&body.title, body.order)
        .await
        .map_err(|e| match e {
            CreateLevelError::InvalidTitle => {
                ServiceError::BadRequest("Invalid level title".to_string())
            }
            CreateLevelError::RepositoryError => {
                ServiceError::Internal("Failed to create level".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(level.into())))
}

#[derive(serde::Deserialize)]
pub struct JsonCreatePrize {
    title: String,
}

pub async fn create_prize(
    State(app_state): State<AppState>,
    Json(body): Json<JsonCreatePrize>,
) -> Result<(StatusCode, Json<JsonPrize>), ServiceError> {
    let prize = app_state
        .app
        .catalog_create_prize_use_case
        .create_prize(&body.title)
        .await
        .map_err(|e| match e {
            CreatePrizeError::InvalidTitle => {
                ServiceError::BadRequest("Invalid prize title".to_string())
            }
            CreatePrizeError::RepositoryError => {
                ServiceError::Internal("Failed to create prize".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(prize.into())))
}

#[derive(serde::Deserialize)]
pub struct JsonAttachPrize {
    prize_id: i64,
}

pub async fn attach_prize(
    Path(level_id): Path<i64>,
    State(app_state): State<AppState>,
    Json(body): Json<JsonAttachPrize>,
) -> Result<(StatusCode, Json<JsonLevelPrize>), ServiceError> {
    let level_prize = app_state
        .app
        .catalog_attach_prize_use_case
        .attach_prize(LevelId(level_id), PrizeId(body.prize_id))
        .await
        .map_err(|e| match e {
            AttachPrizeError::LevelOrPrizeNotFound => ServiceError::NotFound(format!(
                "Level {} or prize {} not found",
                level_id, body.prize_id
            )),
            AttachPrizeError::RepositoryError => {
                ServiceError::Internal("Failed to attach prize".to_string())
            }
        })?;
    Ok((StatusCode::CREATED, Json(level_prize.into())))
}
