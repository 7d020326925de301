pub mod clock;
pub mod config;
pub mod session;
pub mod stats;
pub mod tag;

use focuslog_core::{Config, SqliteStore, Tracker};
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store and restore the tracker with the user's config.
pub fn open_tracker() -> Result<Tracker<SqliteStore>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(Tracker::load(store, Config::load_or_default()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
