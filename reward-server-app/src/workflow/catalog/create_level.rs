use std::sync::Arc;

use crate::domain::level::{Level, LevelRepository};

#[async_trait::async_trait]
pub trait CreateLevelUseCase {
    async fn create_level(&self, title: &str, order: i32) -> Result<Level, CreateLevelError>;
}

#[derive(Debug)]
pub enum CreateLevelError {
    InvalidTitle,
    RepositoryError,
}

pub struct CreateLevelUseCaseImpl<L: LevelRepository> {
    level_repository: Arc<L>,
}

impl<L: LevelRepository> CreateLevelUseCaseImpl<L> {
    pub fn new(level_repository: Arc<L>) -> Self {
        Self { level_repository }
    }
}

#[async_trait::async_trait]
impl<L: LevelRepository + Send + Sync + 'static> CreateLevelUseCase for CreateLevelUseCaseImpl<L> {
    async fn create_level(&self, title: &str, order: i32) -> Result<Level, CreateLevelError> {
        let title = title.trim();
        if title.is_empty() || title.chars().count() > 100 {
            return Err(CreateLevelError::InvalidTitle);
        }
        self.level_repository
            .create_level(title.to_string(), order)
            .await
            .map_err(|e| {
                log::error!("Failed to create level {}: {}", title, e);
                CreateLevelError::RepositoryError
            })
    }
}
