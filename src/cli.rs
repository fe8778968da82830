use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Swiss-system tournament tracker", long_about = None)]
pub struct Cli {
	/// SQLite database file, created if missing
	#[arg(short, long, value_name = "FILE", default_value = "tournament.db")]
	pub database: PathBuf,

	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Register a player
	Register { name: String },
	/// Record that WINNER beat LOSER
	Report { winner: i64, loser: i64 },
	/// Print the number of registered players
	Count,
	Standings {
		/// Write CSV instead of text
		#[arg(long)]
		csv: bool,
	},
	/// Every pair of players on equal wins
	Pairings,
	/// Pair every player once for the next round
	NextRound,
	History,
	/// Report results from a `winner,loser` CSV file
	Import {
		#[arg(value_name = "FILE")]
		results: PathBuf,
	},
	/// Delete all matches and players
	Reset {
		/// Keep the players
		#[arg(long)]
		matches_only: bool,
	},
}
