use std::{num::NonZeroU32, sync::Arc};

use crate::{
    domain::{
        PlayerId, RepoRetrieveError,
        boost::{BoostRepository, PlayerBoost},
        player::PlayerRepository,
    },
    ports::clock::Clock,
};

#[async_trait::async_trait]
pub trait AddBoostUseCase {
    async fn add_boost(
        &self,
        player_id: &PlayerId,
        boost_name: &str,
        quantity: NonZeroU32,
    ) -> Result<PlayerBoost, AddBoostError>;
}

#[derive(Debug)]
pub enum AddBoostError {
    PlayerNotFound,
    BoostNotFound,
    RepositoryError,
}

pub struct AddBoostUseCaseImpl<P: PlayerRepository, B: BoostRepository, C: Clock> {
    player_repository: Arc<P>,
    boost_repository: Arc<B>,
    clock: Arc<C>,
}

impl<P: PlayerRepository, B: BoostRepository, C: Clock> AddBoostUseCaseImpl<P, B, C> {
    pub fn new(player_repository: Arc<P>, boost_repository: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            player_repository,
            boost_repository,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<
    P: PlayerRepository + Send + Sync + 'static,
    B: BoostRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
> AddBoostUseCase for AddBoostUseCaseImpl<P, B, C>
{
    async fn add_boost(
        &self,
        player_id: &PlayerId,
        boost_name: &str,
        quantity: NonZeroU32,
    ) -> Result<PlayerBoost, AddBoostError> {
        match self.player_repository.get_player(player_id).await {
            Ok(_) => {}
            Err(RepoRetrieveError::NotFound) => return Err(AddBoostError::PlayerNotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load player {}: {}", player_id, e);
                return Err(AddBoostError::RepositoryError);
            }
        }
        match self.boost_repository.get_boost(boost_name).await {
            Ok(_) => {}
            Err(RepoRetrieveError::NotFound) => return Err(AddBoostError::BoostNotFound),
            Err(RepoRetrieveError::StorageError(e)) => {
                log::error!("Failed to load boost {}: {}", boost_name, e);
                return Err(AddBoostError::RepositoryError);
            }
        }

        self.boost_repository
            .add_player_boost(player_id, boost_name, quantity, self.clock.now())
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to add boost {} to player {}: {}",
                    boost_name,
                    player_id,
                    e
                );
                AddBoostError::RepositoryError
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::{
            boost::{Boost, BoostType},
            player::Player,
        },
        testing::{MockClock, MockStore},
    };

    use super::*;

    async fn setup() -> (Arc<MockStore>, AddBoostUseCaseImpl<MockStore, MockStore, MockClock>) {
        let store = Arc::new(MockStore::default());
        let clock = Arc::new(MockClock::at(2024, 6, 1, 10));
        store
            .create_player(Player::new(
                PlayerId::new("p1"),
                "alice".to_string(),
                clock.now(),
            ))
            .await
            .unwrap();
        store
            .create_boost(Boost {
                name: "speed".to_string(),
                boost_type: BoostType::Type1,
                description: None,
            })
            .await
            .unwrap();
        let use_case = AddBoostUseCaseImpl::new(store.clone(), store.clone(), clock);
        (store, use_case)
    }

    #[tokio::test]
    async fn test_repeated_grants_accumulate() {
        let (store, use_case) = setup().await;
        let id = PlayerId::new("p1");

        let first = use_case
            .add_boost(&id, "speed", NonZeroU32::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(first.quantity, 2);
        let second = use_case
            .add_boost(&id, "speed", NonZeroU32::new(3).unwrap())
            .await
            .unwrap();
        assert_eq!(second.quantity, 5);
        assert_eq!(second.boost_add_time, first.boost_add_time);

        let rows = store.player_boost_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_unknown_player_or_boost() {
        let (store, use_case) = setup().await;
        let one = NonZeroU32::MIN;

        assert!(matches!(
            use_case.add_boost(&PlayerId::new("p2"), "speed", one).await,
            Err(AddBoostError::PlayerNotFound)
        ));
        assert!(matches!(
            use_case.add_boost(&PlayerId::new("p1"), "shield", one).await,
            Err(AddBoostError::BoostNotFound)
        ));
        assert!(store.player_boost_rows().is_empty());
    }
}
