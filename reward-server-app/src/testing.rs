use std::{
    collections::BTreeMap,
    num::NonZeroU32,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    domain::{
        LevelId, LevelPrizeId, PlayerId, PlayerLevelId, PrizeId, RepoCreateError, RepoError,
        RepoRetrieveError, RepoUpdateError,
        boost::{Boost, BoostRepository, PlayerBoost},
        level::{Level, LevelPrize, LevelRepository, NewPlayerLevel, PlayerLevel, Prize},
        player::{Player, PlayerRepository},
        report::{PlayerLevelReportRepository, PlayerLevelReportRow},
    },
    ports::clock::Clock,
};

#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn at(y: i32, m: u32, d: u32, h: u32) -> Self {
        Self {
            now: Arc::new(Mutex::new(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap())),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
struct Tables {
    players: BTreeMap<PlayerId, Player>,
    boosts: BTreeMap<String, Boost>,
    player_boosts: BTreeMap<(PlayerId, String), PlayerBoost>,
    levels: BTreeMap<LevelId, Level>,
    prizes: BTreeMap<PrizeId, Prize>,
    player_levels: BTreeMap<PlayerLevelId, PlayerLevel>,
    level_prizes: BTreeMap<LevelPrizeId, LevelPrize>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<Tables>>,
    pub page_fetches: Arc<AtomicUsize>,
    pub largest_page: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn page_fetch_count(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    pub fn player_boost_rows(&self) -> Vec<PlayerBoost> {
        self.tables
            .lock()
            .unwrap()
            .player_boosts
            .values()
            .cloned()
            .collect()
    }

    pub fn level_prize(&self, id: LevelPrizeId) -> Option<LevelPrize> {
        self.tables.lock().unwrap().level_prizes.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for MockStore {
    async fn create_player(&self, player: Player) -> Result<(), RepoCreateError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.players.contains_key(&player.player_id)
            || tables
                .players
                .values()
                .any(|p| p.username == player.username)
        {
            return Err(RepoCreateError::Conflict);
        }
        tables.players.insert(player.player_id.clone(), player);
        Ok(())
    }

    async fn get_player(&self, player_id: &PlayerId) -> Result<Player, RepoRetrieveError> {
        self.tables
            .lock()
            .unwrap()
            .players
            .get(player_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn save_player(&self, player: &Player) -> Result<(), RepoUpdateError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .players
            .get_mut(&player.player_id)
            .ok_or(RepoUpdateError::NotFound)?;
        *stored = player.clone();
        Ok(())
    }
}

#[async_trait::async_trait]
impl BoostRepository for MockStore {
    async fn create_boost(&self, boost: Boost) -> Result<(), RepoCreateError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.boosts.contains_key(&boost.name) {
            return Err(RepoCreateError::Conflict);
        }
        tables.boosts.insert(boost.name.clone(), boost);
        Ok(())
    }

    async fn get_boost(&self, name: &str) -> Result<Boost, RepoRetrieveError> {
        self.tables
            .lock()
            .unwrap()
            .boosts
            .get(name)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn add_player_boost(
        &self,
        player_id: &PlayerId,
        boost_name: &str,
        quantity: NonZeroU32,
        now: DateTime<Utc>,
    ) -> Result<PlayerBoost, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .player_boosts
            .entry((player_id.clone(), boost_name.to_string()))
            .and_modify(|row| row.quantity += quantity.get())
            .or_insert_with(|| PlayerBoost {
                player_id: player_id.clone(),
                boost_name: boost_name.to_string(),
                quantity: quantity.get(),
                boost_add_time: now,
            });
        Ok(row.clone())
    }

    async fn list_player_boosts(&self, player_id: &PlayerId) -> Result<Vec<PlayerBoost>, RepoError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .player_boosts
            .values()
            .filter(|row| &row.player_id == player_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LevelRepository for MockStore {
    async fn create_level(&self, title: String, order: i32) -> Result<Level, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let level = Level {
            id: LevelId(tables.next_id()),
            title,
            order,
        };
        tables.levels.insert(level.id, level.clone());
        Ok(level)
    }

    async fn get_level(&self, level_id: LevelId) -> Result<Level, RepoRetrieveError> {
        self.tables
            .lock()
            .unwrap()
            .levels
            .get(&level_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn create_prize(&self, title: String) -> Result<Prize, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let prize = Prize {
            id: PrizeId(tables.next_id()),
            title,
        };
        tables.prizes.insert(prize.id, prize.clone());
        Ok(prize)
    }

    async fn get_prize(&self, prize_id: PrizeId) -> Result<Prize, RepoRetrieveError> {
        self.tables
            .lock()
            .unwrap()
            .prizes
            .get(&prize_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }

    async fn create_level_prize(
        &self,
        level_id: LevelId,
        prize_id: PrizeId,
    ) -> Result<LevelPrize, RepoCreateError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.levels.contains_key(&level_id) || !tables.prizes.contains_key(&prize_id) {
            return Err(RepoCreateError::NotFound);
        }
        let level_prize = LevelPrize {
            id: LevelPrizeId(tables.next_id()),
            level_id,
            prize_id,
            received: None,
        };
        tables.level_prizes.insert(level_prize.id, level_prize.clone());
        Ok(level_prize)
    }

    async fn find_level_prize(&self, level_id: LevelId) -> Result<Option<LevelPrize>, RepoError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .level_prizes
            .values()
            .find(|lp| lp.level_id == level_id)
            .cloned())
    }

    async fn mark_level_prize_received(
        &self,
        level_prize_id: LevelPrizeId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepoUpdateError> {
        let mut tables = self.tables.lock().unwrap();
        let level_prize = tables
            .level_prizes
            .get_mut(&level_prize_id)
            .ok_or(RepoUpdateError::NotFound)?;
        if level_prize.received.is_some() {
            return Ok(false);
        }
        level_prize.received = Some(at);
        Ok(true)
    }

    async fn create_player_level(
        &self,
        player_level: NewPlayerLevel,
    ) -> Result<PlayerLevel, RepoCreateError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.players.contains_key(&player_level.player_id)
            || !tables.levels.contains_key(&player_level.level_id)
        {
            return Err(RepoCreateError::NotFound);
        }
        let row = PlayerLevel {
            id: PlayerLevelId(tables.next_id()),
            player_id: player_level.player_id,
            level_id: player_level.level_id,
            completed: player_level.completed,
            is_completed: player_level.is_completed,
            score: player_level.score,
        };
        tables.player_levels.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_player_level(
        &self,
        player_level_id: PlayerLevelId,
    ) -> Result<PlayerLevel, RepoRetrieveError> {
        self.tables
            .lock()
            .unwrap()
            .player_levels
            .get(&player_level_id)
            .cloned()
            .ok_or(RepoRetrieveError::NotFound)
    }
}

#[async_trait::async_trait]
impl PlayerLevelReportRepository for MockStore {
    async fn fetch_player_level_page(
        &self,
        after: Option<PlayerLevelId>,
        limit: usize,
    ) -> Result<Vec<PlayerLevelReportRow>, RepoError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().unwrap();
        let page: Vec<PlayerLevelReportRow> = tables
            .player_levels
            .values()
            .filter(|pl| after.is_none_or(|after| pl.id > after))
            .take(limit)
            .map(|pl| PlayerLevelReportRow {
                player_level_id: pl.id,
                player_id: pl.player_id.clone(),
                level_title: tables.levels[&pl.level_id].title.clone(),
                is_completed: pl.is_completed,
                prize_title: tables
                    .level_prizes
                    .values()
                    .find(|lp| lp.level_id == pl.level_id)
                    .map(|lp| tables.prizes[&lp.prize_id].title.clone()),
            })
            .collect();
        self.largest_page.fetch_max(page.len(), Ordering::SeqCst);
        Ok(page)
    }
}
