pub mod player_levels;
