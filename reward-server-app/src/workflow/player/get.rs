use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    player::{Player, PlayerRepository},
};

#[async_trait::async_trait]
pub trait GetPlayerUseCase {
    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, GetPlayerError>;
}

#[derive(Debug)]
pub enum GetPlayerError {
    NotFound,
    RepositoryError,
}

pub struct GetPlayerUseCaseImpl<P: PlayerRepository> {
    player_repository: Arc<P>,
}

impl<P: PlayerRepository> GetPlayerUseCaseImpl<P> {
    pub fn new(player_repository: Arc<P>) -> Self {
        Self { player_repository }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static> GetPlayerUseCase for GetPlayerUseCaseImpl<P> {
    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, GetPlayerError> {
        match self.player_repository.get_player(player_id).await {
            Ok(player) => Ok(player),
            Err(RepoRetrieveError::NotFound) => Err(GetPlayerError::NotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to retrieve player {}: {}", player_id, e);
                Err(GetPlayerError::RepositoryError)
            }
        }
    }
}
