use std::sync::Arc;

use crate::domain::{
    RepoCreateError,
    level::{LevelRepository, NewPlayerLevel, PlayerLevel},
};

#[async_trait::async_trait]
pub trait RecordLevelResultUseCase {
    async fn record_result(
        &self,
        result: NewPlayerLevel,
    ) -> Result<PlayerLevel, RecordLevelResultError>;
}

#[derive(Debug)]
pub enum RecordLevelResultError {
    PlayerOrLevelNotFound,
    RepositoryError,
}

pub struct RecordLevelResultUseCaseImpl<L: LevelRepository> {
    level_repository: Arc<L>,
}

impl<L: LevelRepository> RecordLevelResultUseCaseImpl<L> {
    pub fn new(level_repository: Arc<L>) -> Self {
        Self { level_repository }
    }
}

#[async_trait::async_trait]
impl<L: LevelRepository + Send + Sync + 'static> RecordLevelResultUseCase
    for RecordLevelResultUseCaseImpl<L>
{
    async fn record_result(
        &self,
        result: NewPlayerLevel,
    ) -> Result<PlayerLevel, RecordLevelResultError> {
        let player_id = result.player_id.clone();
        let level_id = result.level_id;
        match self.level_repository.create_player_level(result).await {
            Ok(player_level) => Ok(player_level),
            Err(RepoCreateError::NotFound) => Err(RecordLevelResultError::PlayerOrLevelNotFound),
            Err(e) => {
                log::error!(
                    "Failed to record result of player {} on level {}: {}",
                    player_id,
                    level_id,
                    e
                );
                Err(RecordLevelResultError::RepositoryError)
            }
        }
    }
}
