use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    domain::{
        PlayerId, PlayerLevelId, RepoRetrieveError, RepoUpdateError, level::LevelRepository,
    },
    ports::clock::Clock,
};

#[async_trait::async_trait]
pub trait AssignPrizeUseCase {
    async fn assign_prize(
        &self,
        player_level_id: PlayerLevelId,
    ) -> Result<PrizeAssignment, AssignPrizeError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrizeAssignment {
    LevelNotCompleted {
        level_title: String,
    },
    NoPrizeConfigured {
        level_title: String,
    },
    Granted {
        prize_title: String,
        player_id: PlayerId,
        level_title: String,
        received: DateTime<Utc>,
    },
    AlreadyGranted,
}

impl std::fmt::Display for PrizeAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeAssignment::LevelNotCompleted { level_title } => {
                write!(f, "Level {} is not completed yet.", level_title)
            }
            PrizeAssignment::NoPrizeConfigured { level_title } => {
                write!(f, "No prize found for level {}.", level_title)
            }
            PrizeAssignment::Granted {
                prize_title,
                player_id,
                level_title,
                ..
            } => write!(
                f,
                "Prize '{}' granted to player {} for level {}.",
                prize_title, player_id, level_title
            ),
            PrizeAssignment::AlreadyGranted => write!(f, "Prize has already been granted."),
        }
    }
}

#[derive(Debug)]
pub enum AssignPrizeError {
    PlayerLevelNotFound,
    RepositoryError,
}

pub struct AssignPrizeUseCaseImpl<L: LevelRepository, C: Clock> {
    level_repository: Arc<L>,
    clock: Arc<C>,
}

impl<L: LevelRepository, C: Clock> AssignPrizeUseCaseImpl<L, C> {
    pub fn new(level_repository: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            level_repository,
            clock,
        }
    }
}

fn retrieve_error(what: &str, e: RepoRetrieveError) -> AssignPrizeError {
    log::error!("Failed to load {} for prize assignment: {}", what, e);
    AssignPrizeError::RepositoryError
}

#[async_trait::async_trait]
impl<L: LevelRepository + Send + Sync + 'static, C: Clock + Send + Sync + 'static>
    AssignPrizeUseCase for AssignPrizeUseCaseImpl<L, C>
{
    async fn assign_prize(
        &self,
        player_level_id: PlayerLevelId,
    ) -> Result<PrizeAssignment, AssignPrizeError> {
        let player_level = match self.level_repository.get_player_level(player_level_id).await {
            Ok(player_level) => player_level,
            Err(RepoRetrieveError::NotFound) => return Err(AssignPrizeError::PlayerLevelNotFound),
            Err(e) => return Err(retrieve_error("player level", e)),
        };
        let level = self
            .level_repository
            .get_level(player_level.level_id)
            .await
            .map_err(|e| retrieve_error("level", e))?;

        if !player_level.is_completed {
            return Ok(PrizeAssignment::LevelNotCompleted {
                level_title: level.title,
            });
        }

        let level_prize = self
            .level_repository
            .find_level_prize(level.id)
            .await
            .map_err(|e| {
                log::error!("Failed to look up prize of level {}: {}", level.id, e);
                AssignPrizeError::RepositoryError
            })?;
        let Some(level_prize) = level_prize else {
            return Ok(PrizeAssignment::NoPrizeConfigured {
                level_title: level.title,
            });
        };
        if level_prize.is_received() {
            return Ok(PrizeAssignment::AlreadyGranted);
        }

        let now = self.clock.now();
        match self
            .level_repository
            .mark_level_prize_received(level_prize.id, now)
            .await
        {
            Ok(true) => {}
            // someone else granted it between the lookup and the update
            Ok(false) => return Ok(PrizeAssignment::AlreadyGranted),
            Err(RepoUpdateError::NotFound) => {
                log::warn!("Level prize {} vanished during assignment", level_prize.id);
                return Ok(PrizeAssignment::NoPrizeConfigured {
                    level_title: level.title,
                });
            }
            Err(RepoUpdateError::StorageError(e)) => {
                log::error!("Failed to mark level prize {} received: {}", level_prize.id, e);
                return Err(AssignPrizeError::RepositoryError);
            }
        }

        let prize = self
            .level_repository
            .get_prize(level_prize.prize_id)
            .await
            .map_err(|e| retrieve_error("prize", e))?;

        log::info!(
            "Granted prize {} to player {} for level {}",
            prize.title,
            player_level.player_id,
            level.title
        );
        Ok(PrizeAssignment::Granted {
            prize_title: prize.title,
            player_id: player_level.player_id,
            level_title: level.title,
            received: now,
        })
    }
}
