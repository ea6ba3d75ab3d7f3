use std::sync::Arc;

use crate::domain::{
    RepoCreateError,
    boost::{Boost, BoostRepository, BoostType},
};

#[async_trait::async_trait]
pub trait CreateBoostUseCase {
    async fn create_boost(
        &self,
        name: &str,
        boost_type: BoostType,
        description: Option<String>,
    ) -> Result<Boost, CreateBoostError>;
}

#[derive(Debug)]
pub enum CreateBoostError {
    InvalidName,
    AlreadyExists,
    RepositoryError,
}

pub struct CreateBoostUseCaseImpl<B: BoostRepository> {
    boost_repository: Arc<B>,
}

impl<B: BoostRepository> CreateBoostUseCaseImpl<B> {
    pub fn new(boost_repository: Arc<B>) -> Self {
        Self { boost_repository }
    }
}

#[async_trait::async_trait]
impl<B: BoostRepository + Send + Sync + 'static> CreateBoostUseCase for CreateBoostUseCaseImpl<B> {
    async fn create_boost(
        &self,
        name: &str,
        boost_type: BoostType,
        description: Option<String>,
    ) -> Result<Boost, CreateBoostError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 255 {
            return Err(CreateBoostError::InvalidName);
        }
        let boost = Boost {
            name: name.to_string(),
            boost_type,
            description: description.filter(|d| !d.trim().is_empty()),
        };
        match self.boost_repository.create_boost(boost.clone()).await {
            Ok(()) => Ok(boost),
            Err(RepoCreateError::Conflict) => Err(CreateBoostError::AlreadyExists),
            Err(e) => {
                log::error!("Failed to create boost {}: {}", boost.name, e);
                Err(CreateBoostError::RepositoryError)
            }
        }
    }
}
