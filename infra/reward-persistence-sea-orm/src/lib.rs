use async_lock::OnceCell;
use reward_persistence_sea_orm_entities::{
    boost, level, level_prize, player, player_boost, player_level, prize,
};
use reward_server_app::domain::{RepoCreateError, RepoError, RepoRetrieveError, RepoUpdateError};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, SqlErr};

pub mod boosts;
pub mod levels;
pub mod players;
pub mod reports;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn connect(db_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(max_connections).sqlx_logging(false);
    Database::connect(opt).await
}

pub async fn create_db_pool() -> DatabaseConnection {
    DB_POOL
        .get_or_init(|| async move {
            let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            connect(&db_url, 5)
                .await
                .expect("Failed to connect to database")
        })
        .await
        .clone()
}

/// Creates every table that does not exist yet, parents before children.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());
    let mut statements = vec![
        schema.create_table_from_entity(player::Entity),
        schema.create_table_from_entity(boost::Entity),
        schema.create_table_from_entity(level::Entity),
        schema.create_table_from_entity(prize::Entity),
        schema.create_table_from_entity(player_boost::Entity),
        schema.create_table_from_entity(player_level::Entity),
        schema.create_table_from_entity(level_prize::Entity),
    ];
    for statement in statements.iter_mut() {
        statement.if_not_exists();
        db.execute(&*statement).await?;
    }
    Ok(())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn repo_error(e: DbErr) -> RepoError {
    RepoError::StorageError(e.to_string())
}

pub(crate) fn retrieve_error(e: DbErr) -> RepoRetrieveError {
    RepoRetrieveError::StorageError(e.to_string())
}

pub(crate) fn update_error(e: DbErr) -> RepoUpdateError {
    match e {
        DbErr::RecordNotUpdated => RepoUpdateError::NotFound,
        e => RepoUpdateError::StorageError(e.to_string()),
    }
}

pub(crate) fn create_error(e: DbErr) -> RepoCreateError {
    if is_unique_violation(&e) {
        return RepoCreateError::Conflict;
    }
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepoCreateError::NotFound,
        _ => RepoCreateError::StorageError(e.to_string()),
    }
}
