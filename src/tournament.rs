use std::{
	io::{Read, Write},
	path::PathBuf,
};

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
	data::{self, MatchResult, Pairing, Standing},
	db,
	error::TournamentError,
	pairing,
	sanitize::sanitize,
	standings::Snapshot,
	storage::{FileStorage, MemoryStorage, Storage},
};

/// A row of a results CSV: `winner,loser`.
#[derive(Debug, Deserialize)]
struct ResultRecord {
	winner: i64,
	loser: i64,
}

/// The tournament operations, run against whatever [`Storage`] it was given.
///
/// Nothing is cached between calls; every read goes back to the database.
pub struct Tournament<S> {
	storage: S,
}

impl Tournament<FileStorage> {
	/// Opens the database file at `path`, creating the schema if needed.
	pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, TournamentError> {
		Self::open(FileStorage::new(path))
	}
}

impl Tournament<MemoryStorage> {
	pub fn in_memory() -> Result<Self, TournamentError> {
		Self::open(MemoryStorage::new()?)
	}
}

impl<S: Storage> Tournament<S> {
	pub fn open(storage: S) -> Result<Self, TournamentError> {
		storage.with_connection(db::create_schema)?;
		Ok(Tournament { storage })
	}

	/// Sanitizes `name` and adds the player. Duplicate names are allowed.
	#[instrument(skip_all)]
	pub fn register_player(&self, name: &str) -> Result<i64, TournamentError> {
		let name = sanitize(name);
		let id = self
			.storage
			.with_connection(|conn| data::register_player(conn, &name))?;
		info!(id, name = %name, "registered player");

		Ok(id)
	}

	/// Records that `winner` beat `loser`. Neither id is checked against
	/// `players`; that is up to the caller.
	#[instrument(skip(self))]
	pub fn report_match(&self, winner: i64, loser: i64) -> Result<i64, TournamentError> {
		let match_id = self
			.storage
			.with_connection(|conn| data::report_match(conn, winner, loser, Utc::now()))?;
		info!(match_id, "reported match");

		Ok(match_id)
	}

	pub fn next_match_id(&self) -> Result<i64, TournamentError> {
		Ok(self.storage.with_connection(|conn| data::next_match_id(conn))?)
	}

	#[instrument(skip_all)]
	pub fn delete_matches(&self) -> Result<(), TournamentError> {
		let removed = self.storage.with_connection(|conn| data::delete_matches(conn))?;
		info!(removed, "deleted matches");

		Ok(())
	}

	/// Removes every player. Match rows are left alone, even those that
	/// reference the deleted players.
	#[instrument(skip_all)]
	pub fn delete_players(&self) -> Result<(), TournamentError> {
		let removed = self.storage.with_connection(|conn| data::delete_players(conn))?;
		info!(removed, "deleted players");

		Ok(())
	}

	pub fn count_players(&self) -> Result<usize, TournamentError> {
		Ok(self.storage.with_connection(|conn| data::count_players(conn))?)
	}

	/// Standings with the most wins first, ties in id order.
	pub fn player_standings(&self) -> Result<Vec<Standing>, TournamentError> {
		Ok(self.storage.with_connection(|conn| data::player_standings(conn))?)
	}

	/// Candidate pairs of players on equal wins. A player can appear in more
	/// than one pair; use [`Tournament::next_round`] for a full round.
	pub fn swiss_pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
		Ok(self.storage.with_connection(|conn| data::swiss_pairings(conn))?)
	}

	/// Pairs every player exactly once, avoiding rematches where possible.
	#[instrument(skip_all)]
	pub fn next_round(&self) -> Result<Vec<Pairing>, TournamentError> {
		let (standings, history) = self.storage.with_connection(|conn| {
			Ok((data::player_standings(conn)?, data::match_history(conn)?))
		})?;

		pairing::next_round(&standings, &history)
	}

	pub fn match_history(&self) -> Result<Vec<MatchResult>, TournamentError> {
		Ok(self.storage.with_connection(|conn| data::match_history(conn))?)
	}

	pub fn snapshot(&self) -> Result<Snapshot, TournamentError> {
		Ok(self.storage.with_connection(|conn| {
			Ok(Snapshot {
				players: data::load_players(conn)?,
				matches: data::load_match_rows(conn)?,
			})
		})?)
	}

	/// Reports every `winner,loser` row of a headered CSV, in file order.
	/// Rows before a malformed one stay reported.
	#[instrument(skip_all)]
	pub fn import_results<R: Read>(&self, reader: R) -> Result<usize, TournamentError> {
		let mut rdr = csv::Reader::from_reader(reader);
		let mut imported = 0;

		for record in rdr.deserialize() {
			let record: ResultRecord = record?;
			self.report_match(record.winner, record.loser)?;
			imported += 1;
		}

		info!(imported, "imported results");
		Ok(imported)
	}

	/// Writes the standings as CSV with an `id,name,wins,matches` header.
	pub fn export_standings<W: Write>(&self, writer: W) -> Result<(), TournamentError> {
		let mut wtr = csv::Writer::from_writer(writer);
		for standing in self.player_standings()? {
			wtr.serialize(standing)?;
		}
		wtr.flush()?;

		Ok(())
	}
}
