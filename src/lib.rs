//! # swisstrack
//!
//! Player registration, match results, standings and pairings for a
//! Swiss-system tournament, stored in SQLite.
//!
//! Win counting and the equal-wins pairing candidates live in SQL (the
//! `leader_board` view and a self-join on it). [`standings`] holds the same
//! aggregation as plain functions, and [`pairing`] builds a full round where
//! every player gets exactly one opponent.
//!
//! ```no_run
//! use swisstrack::Tournament;
//!
//! let tournament = Tournament::open_file("tournament.db")?;
//! let alice = tournament.register_player("Alice")?;
//! let bob = tournament.register_player("Bob")?;
//! tournament.report_match(alice, bob)?;
//!
//! for standing in tournament.player_standings()? {
//!     println!("{} {}/{}", standing.name, standing.wins, standing.matches);
//! }
//! # Ok::<(), swisstrack::TournamentError>(())
//! ```

pub mod data;
pub mod db;
pub mod error;
pub mod pairing;
pub mod report;
pub mod sanitize;
pub mod standings;
pub mod storage;
pub mod tournament;

pub use data::{MatchResult, MatchRow, Pairing, Player, Standing};
pub use error::TournamentError;
pub use standings::Snapshot;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tournament::Tournament;
