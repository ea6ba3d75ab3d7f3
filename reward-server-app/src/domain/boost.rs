use std::num::NonZeroU32;

use chrono::{DateTime, Utc};

use crate::domain::{PlayerId, RepoCreateError, RepoError, RepoRetrieveError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostType {
    Type1,
    Type2,
    Type3,
}

impl BoostType {
    pub const ALL: [BoostType; 3] = [BoostType::Type1, BoostType::Type2, BoostType::Type3];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoostType::Type1 => "type1",
            BoostType::Type2 => "type2",
            BoostType::Type3 => "type3",
        }
    }
}

impl std::str::FromStr for BoostType {
    type Err = UnknownBoostType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoostType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBoostType(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown boost type: {0}")]
pub struct UnknownBoostType(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boost {
    pub name: String,
    pub boost_type: BoostType,
    pub description: Option<String>,
}

/// Inventory row of one boost held by one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerBoost {
    pub player_id: PlayerId,
    pub boost_name: String,
    pub quantity: u32,
    pub boost_add_time: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait BoostRepository {
    async fn create_boost(&self, boost: Boost) -> Result<(), RepoCreateError>;
    async fn get_boost(&self, name: &str) -> Result<Boost, RepoRetrieveError>;
    /// Finds or creates the (player, boost) row and adds `quantity` to it.
    /// A created row starts at `quantity` with `boost_add_time = now`.
    async fn add_player_boost(
        &self,
        player_id: &PlayerId,
        boost_name: &str,
        quantity: NonZeroU32,
        now: DateTime<Utc>,
    ) -> Result<PlayerBoost, RepoError>;
    async fn list_player_boosts(&self, player_id: &PlayerId) -> Result<Vec<PlayerBoost>, RepoError>;
}
