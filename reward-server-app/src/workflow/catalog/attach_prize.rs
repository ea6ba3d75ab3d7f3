use std::sync::Arc;

use crate::domain::{
    LevelId, PrizeId, RepoCreateError,
    level::{LevelPrize, LevelRepository},
};

#[async_trait::async_trait]
pub trait AttachPrizeUseCase {
    async fn attach_prize(
        &self,
        level_id: LevelId,
        prize_id: PrizeId,
    ) -> Result<LevelPrize, AttachPrizeError>;
}

#[derive(Debug)]
pub enum AttachPrizeError {
    LevelOrPrizeNotFound,
    RepositoryError,
}

pub struct AttachPrizeUseCaseImpl<L: LevelRepository> {
    level_repository: Arc<L>,
}

impl<L: LevelRepository> AttachPrizeUseCaseImpl<L> {
    pub fn new(level_repository: Arc<L>) -> Self {
        Self { level_repository }
    }
}

#[async_trait::async_trait]
impl<L: LevelRepository + Send + Sync + 'static> AttachPrizeUseCase for AttachPrizeUseCaseImpl<L> {
    async fn attach_prize(
        &self,
        level_id: LevelId,
        prize_id: PrizeId,
    ) -> Result<LevelPrize, AttachPrizeError> {
        match self
            .level_repository
            .create_level_prize(level_id, prize_id)
            .await
        {
            Ok(level_prize) => {
                log::info!("Prize {} configured for level {}", prize_id, level_id);
                Ok(level_prize)
            }
            Err(RepoCreateError::NotFound) => Err(AttachPrizeError::LevelOrPrizeNotFound),
            Err(e) => {
                log::error!(
                    "Failed to attach prize {} to level {}: {}",
                    prize_id,
                    level_id,
                    e
                );
                Err(AttachPrizeError::RepositoryError)
            }
        }
    }
}
