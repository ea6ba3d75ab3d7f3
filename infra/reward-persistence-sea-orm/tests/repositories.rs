use std::{num::NonZeroU32, sync::Arc};

use chrono::{NaiveDate, TimeZone, Utc};
use reward_persistence_sea_orm::{
    boosts::BoostRepositoryImpl, connect, create_tables, levels::LevelRepositoryImpl,
    players::PlayerRepositoryImpl, reports::PlayerLevelReportRepositoryImpl,
};
use reward_server_app::domain::{
    LevelId, PlayerId, PlayerLevelId, RepoCreateError,
    boost::{Boost, BoostRepository, BoostType},
    level::{LevelRepository, NewPlayerLevel},
    player::{Player, PlayerRepository},
    report::PlayerLevelReportRepository,
};
use sea_orm::DatabaseConnection;

async fn memory_db() -> DatabaseConnection {
    // a single connection, every new sqlite memory connection is a fresh database
    let db = connect("sqlite::memory:", 1).await.unwrap();
    create_tables(&db).await.unwrap();
    db
}

fn player(id: &str, username: &str) -> Player {
    Player::new(
        PlayerId::new(id),
        username.to_string(),
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_player_roundtrip() {
    let repo = PlayerRepositoryImpl::with_connection(memory_db().await);
    repo.create_player(player("p1", "alice")).await.unwrap();

    assert!(matches!(
        repo.create_player(player("p1", "bob")).await,
        Err(RepoCreateError::Conflict)
    ));
    assert!(matches!(
        repo.create_player(player("p2", "alice")).await,
        Err(RepoCreateError::Conflict)
    ));

    let mut stored = repo.get_player(&PlayerId::new("p1")).await.unwrap();
    assert_eq!(stored, player("p1", "alice"));

    stored.points = 40;
    stored.last_login = Some(Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap());
    repo.save_player(&stored).await.unwrap();
    assert_eq!(repo.get_player(&PlayerId::new("p1")).await.unwrap(), stored);
}

#[tokio::test]
async fn test_player_boost_quantities_accumulate() {
    let db = memory_db().await;
    let players = PlayerRepositoryImpl::with_connection(db.clone());
    let boosts = BoostRepositoryImpl::with_connection(db);
    players.create_player(player("p1", "alice")).await.unwrap();
    boosts
        .create_boost(Boost {
            name: "speed".to_string(),
            boost_type: BoostType::Type3,
            description: Some("Run faster".to_string()),
        })
        .await
        .unwrap();

    let id = PlayerId::new("p1");
    let added_at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    boosts
        .add_player_boost(&id, "speed", NonZeroU32::new(2).unwrap(), added_at)
        .await
        .unwrap();
    let later = Utc.with_ymd_and_hms(2024, 2, 3, 12, 0, 0).unwrap();
    let row = boosts
        .add_player_boost(&id, "speed", NonZeroU32::new(5).unwrap(), later)
        .await
        .unwrap();
    assert_eq!(row.quantity, 7);
    assert_eq!(row.boost_add_time, added_at);

    let rows = boosts.list_player_boosts(&id).await.unwrap();
    assert_eq!(rows, vec![row]);
    assert_eq!(boosts.get_boost("speed").await.unwrap().boost_type, BoostType::Type3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_grants_share_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("rewards.db").display());
    let db = connect(&url, 8).await.unwrap();
    create_tables(&db).await.unwrap();

    let players = PlayerRepositoryImpl::with_connection(db.clone());
    let boosts = Arc::new(BoostRepositoryImpl::with_connection(db));
    players.create_player(player("p1", "alice")).await.unwrap();
    boosts
        .create_boost(Boost {
            name: "speed".to_string(),
            boost_type: BoostType::Type1,
            description: None,
        })
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let boosts = boosts.clone();
            tokio::spawn(async move {
                boosts
                    .add_player_boost(&PlayerId::new("p1"), "speed", NonZeroU32::MIN, now)
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let rows = boosts.list_player_boosts(&PlayerId::new("p1")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 16);
    assert_eq!(rows[0].boost_add_time, now);
}

#[tokio::test]
async fn test_level_prize_is_received_once() {
    let repo = LevelRepositoryImpl::with_connection(memory_db().await);
    let level = repo.create_level("Forest".to_string(), 1).await.unwrap();
    let prize = repo.create_prize("Golden Axe".to_string()).await.unwrap();
    let level_prize = repo.create_level_prize(level.id, prize.id).await.unwrap();
    assert_eq!(level_prize.received, None);

    assert!(matches!(
        repo.create_level_prize(LevelId(999), prize.id).await,
        Err(RepoCreateError::NotFound)
    ));

    let first = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
    assert!(repo.mark_level_prize_received(level_prize.id, first).await.unwrap());
    assert!(!repo.mark_level_prize_received(level_prize.id, second).await.unwrap());

    let stored = repo.find_level_prize(level.id).await.unwrap().unwrap();
    assert_eq!(stored.received, Some(first));
}

#[tokio::test]
async fn test_report_pages() {
    let db = memory_db().await;
    let players = PlayerRepositoryImpl::with_connection(db.clone());
    let levels = LevelRepositoryImpl::with_connection(db.clone());
    let reports = PlayerLevelReportRepositoryImpl::with_connection(db);

    players.create_player(player("p1", "alice")).await.unwrap();
    let forest = levels.create_level("Forest".to_string(), 1).await.unwrap();
    let cave = levels.create_level("Cave".to_string(), 2).await.unwrap();
    let axe = levels.create_prize("Golden Axe".to_string()).await.unwrap();
    let shield = levels.create_prize("Shield".to_string()).await.unwrap();
    levels.create_level_prize(forest.id, axe.id).await.unwrap();
    levels.create_level_prize(forest.id, shield.id).await.unwrap();

    for (level_id, is_completed) in [(forest.id, true), (cave.id, false), (forest.id, false)] {
        levels
            .create_player_level(NewPlayerLevel {
                player_id: PlayerId::new("p1"),
                level_id,
                completed: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                is_completed,
                score: 10,
            })
            .await
            .unwrap();
    }

    let first_page = reports.fetch_player_level_page(None, 2).await.unwrap();
    assert_eq!(first_page.len(), 2);
    let lines: Vec<String> = first_page.iter().map(|r| r.to_csv_line()).collect();
    assert_eq!(
        lines,
        vec!["p1,Forest,Yes,Golden Axe\n", "p1,Cave,No,No prize\n"]
    );

    let after = first_page.last().map(|r| r.player_level_id);
    let second_page = reports.fetch_player_level_page(after, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].to_csv_line(), "p1,Forest,No,Golden Axe\n");

    let tail = second_page.last().map(|r| r.player_level_id);
    assert!(reports.fetch_player_level_page(tail, 2).await.unwrap().is_empty());
    assert!(
        reports
            .fetch_player_level_page(Some(PlayerLevelId(i64::MAX)), 2)
            .await
            .unwrap()
            .is_empty()
    );
}
