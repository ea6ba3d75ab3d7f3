use std::sync::Arc;

use crate::domain::level::{LevelRepository, Prize};

#[async_trait::async_trait]
pub trait CreatePrizeUseCase {
    async fn create_prize(&self, title: &str) -> Result<Prize, CreatePrizeError>;
}

#[derive(Debug)]
pub enum CreatePrizeError {
    InvalidTitle,
    RepositoryError,
}

pub struct CreatePrizeUseCaseImpl<L: LevelRepository> {
    level_repository: Arc<L>,
}

impl<L: LevelRepository> CreatePrizeUseCaseImpl<L> {
    pub fn new(level_repository: Arc<L>) -> Self {
        Self { level_repository }
    }
}

#[async_trait::async_trait]
impl<L: LevelRepository + Send + Sync + 'static> CreatePrizeUseCase for CreatePrizeUseCaseImpl<L> {
    async fn create_prize(&self, title: &str) -> Result<Prize, CreatePrizeError> {
        let title = title.trim();
        if title.is_empty() || title.chars().count() > 100 {
            return Err(CreatePrizeError::InvalidTitle);
        }
        self.level_repository
            .create_prize(title.to_string())
            .await
            .map_err(|e| {
                log::error!("Failed to create prize {}: {}", title, e);
                CreatePrizeError::RepositoryError
            })
    }
}
