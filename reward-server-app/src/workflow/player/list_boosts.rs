use std::sync::Arc;

use crate::domain::{
    PlayerId, RepoRetrieveError,
    boost::{BoostRepository, PlayerBoost},
    player::PlayerRepository,
};

#[async_trait::async_trait]
pub trait ListPlayerBoostsUseCase {
    async fn list_boosts(&self, player_id: &PlayerId) -> Result<Vec<PlayerBoost>, ListBoostsError>;
}

#[derive(Debug)]
pub enum ListBoostsError {
    PlayerNotFound,
    RepositoryError,
}

pub struct ListPlayerBoostsUseCaseImpl<P: PlayerRepository, B: BoostRepository> {
    player_repository: Arc<P>,
    boost_repository: Arc<B>,
}

impl<P: PlayerRepository, B: BoostRepository> ListPlayerBoostsUseCaseImpl<P, B> {
    pub fn new(player_repository: Arc<P>, boost_repository: Arc<B>) -> Self {
        Self {
            player_repository,
            boost_repository,
        }
    }
}

#[async_trait::async_trait]
impl<P: PlayerRepository + Send + Sync + 'static, B: BoostRepository + Send + Sync + 'static>
    ListPlayerBoostsUseCase for ListPlayerBoostsUseCaseImpl<P, B>
{
    async fn list_boosts(&self, player_id: &PlayerId) -> Result<Vec<PlayerBoost>, ListBoostsError> {
        match self.player_repository.get_player(player_id).await {
            Ok(_) => {}
            Err(RepoRetrieveError::NotFound) => return Err(ListBoostsError::PlayerNotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {}: {}", player_id, e);
                return Err(ListBoostsError::RepositoryError);
            }
        }

        self.boost_repository
            .list_player_boosts(player_id)
            .await
            .map_err(|e| {
                log::error!("Failed to list boosts of player {}: {}", player_id, e);
                ListBoostsError::RepositoryError
            })
    }
}
