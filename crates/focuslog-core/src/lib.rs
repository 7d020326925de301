//! # Focuslog Core Library
//!
//! Core logic for the Focuslog time tracker. Every operation is available
//! through the `focuslog` CLI; this crate holds the state machines, the
//! session log and the statistics behind it.
//!
//! ## Architecture
//!
//! - **Clock**: a countdown and a stopwatch behind one active-mode switch.
//!   The caller drives progress by delivering [`Tick`]s once per second.
//! - **Session**: the recorder that turns a stopped clock into a
//!   [`RecordedSession`], plus the tag set those sessions are filed under.
//! - **Stats**: pure aggregation over the session log for charts.
//! - **Storage**: a string key-value store (SQLite on disk) and TOML
//!   configuration.
//!
//! ## Key Components
//!
//! - [`Tracker`]: clock, log and tags bound to a store
//! - [`SessionClock`]: the two clock machines
//! - [`Dashboard`]: everything a chart layer needs
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod input;
pub mod session;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use clock::{ClockMode, ClockState, CompletionPolicy, SessionClock, StopOutcome, Tick};
pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use session::{RecordedSession, SessionLog, TagSet};
pub use stats::{Dashboard, Summary};
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use tracker::Tracker;
