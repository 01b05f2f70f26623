pub mod catalog;
pub mod config;
pub mod index;
pub mod models;
pub mod output;
pub mod playlist;
pub mod query;

/// Application name for XDG paths
pub const APP_NAME: &str = "moodlist";
