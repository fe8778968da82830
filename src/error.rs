use thiserror::Error;

/// Errors returned by tournament operations.
///
/// Database failures are passed through untouched; nothing is retried.
#[derive(Debug, Error)]
pub enum TournamentError {
	/// The database could not be opened, or a statement failed.
	#[error("SQLite error: {0}")]
	Sqlite(#[from] rusqlite::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A full round needs an even field; byes are not handled.
	#[error("cannot pair an odd number of players ({0})")]
	OddPlayerCount(usize),

	#[error("no complete pairing exists for this round")]
	NoPairing,
}
