pub mod add_boost;
pub mod get;
pub mod list_boosts;
pub mod record_login;
pub mod register;
