use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result, TransactionBehavior};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
	pub id: i64,
	pub name: String,
}

/// One participant's side of a match. Every match is stored as two rows
/// sharing a `match_id`, one winning and one losing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
	pub match_id: i64,
	pub player_id: i64,
	pub win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
	pub match_id: i64,
	pub winner: i64,
	pub loser: i64,
	pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
	pub id: i64,
	pub name: String,
	pub wins: u32,
	pub matches: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
	pub id1: i64,
	pub name1: String,
	pub id2: i64,
	pub name2: String,
}

impl Pairing {
	pub fn new(first: &Standing, second: &Standing) -> Self {
		Pairing {
			id1: first.id,
			name1: first.name.clone(),
			id2: second.id,
			name2: second.name.clone(),
		}
	}
}

/// Inserts an already sanitized name and returns the id SQLite assigned.
pub fn register_player(conn: &Connection, name: &str) -> Result<i64> {
	let mut stmt = conn.prepare("INSERT INTO players (name) VALUES (?1);")?;
	stmt.execute([name])?;

	Ok(conn.last_insert_rowid())
}

pub fn next_match_id(conn: &Connection) -> Result<i64> {
	let max: Option<i64> =
		conn.query_row("SELECT MAX(match_id) FROM matches;", [], |row| row.get(0))?;

	Ok(max.map_or(1, |id| id + 1))
}

/// Records `winner` beating `loser` and returns the new match id.
///
/// The id lookup and both inserts share one IMMEDIATE transaction, which takes
/// the database write lock up front, so two reporters cannot read the same
/// maximum id.
pub fn report_match(
	conn: &mut Connection,
	winner: i64,
	loser: i64,
	reported_at: DateTime<Utc>,
) -> Result<i64> {
	let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
	let match_id = next_match_id(&tx)?;

	{
		let mut stmt = tx.prepare(
			"INSERT INTO matches (match_id, player_id, win, reported_at)
			 VALUES (?1, ?2, ?3, ?4);",
		)?;
		stmt.execute(params![match_id, winner, true, reported_at])?;
		stmt.execute(params![match_id, loser, false, reported_at])?;
	}

	tx.commit()?;
	debug!(match_id, winner, loser, "inserted match rows");

	Ok(match_id)
}

pub fn count_players(conn: &Connection) -> Result<usize> {
	conn.query_row("SELECT COUNT(id) FROM players;", [], |row| row.get(0))
}

pub fn player_standings(conn: &Connection) -> Result<Vec<Standing>> {
	let mut stmt = conn.prepare(
		"SELECT id, name, wins, matches
		   FROM leader_board
		  ORDER BY wins DESC, id ASC;",
	)?;

	let rows = stmt.query_map([], |row| {
		Ok(Standing {
			id: row.get(0)?,
			name: row.get(1)?,
			wins: row.get(2)?,
			matches: row.get(3)?,
		})
	})?;

	rows.collect()
}

/// Every pair of distinct players with the same number of wins, lower id first.
/// A player tied with several others shows up in several pairs.
pub fn swiss_pairings(conn: &Connection) -> Result<Vec<Pairing>> {
	let mut stmt = conn.prepare(
		"SELECT a.id, a.name, b.id, b.name
		   FROM leader_board a, leader_board b
		  WHERE a.wins = b.wins
			AND a.id < b.id
		  ORDER BY a.id, b.id;",
	)?;

	let rows = stmt.query_map([], |row| {
		Ok(Pairing {
			id1: row.get(0)?,
			name1: row.get(1)?,
			id2: row.get(2)?,
			name2: row.get(3)?,
		})
	})?;

	rows.collect()
}

pub fn match_history(conn: &Connection) -> Result<Vec<MatchResult>> {
	let mut stmt = conn.prepare(
		"SELECT w.match_id, w.player_id, l.player_id, w.reported_at
		   FROM matches w
		   JOIN matches l ON w.match_id = l.match_id
		  WHERE w.win = 1
			AND l.win = 0
		  ORDER BY w.match_id;",
	)?;

	let rows = stmt.query_map([], |row| {
		Ok(MatchResult {
			match_id: row.get(0)?,
			winner: row.get(1)?,
			loser: row.get(2)?,
			reported_at: row.get(3)?,
		})
	})?;

	rows.collect()
}

pub fn load_players(conn: &Connection) -> Result<Vec<Player>> {
	let mut stmt = conn.prepare("SELECT id, name FROM players ORDER BY id;")?;
	let rows = stmt.query_map([], |row| {
		Ok(Player {
			id: row.get(0)?,
			name: row.get(1)?,
		})
	})?;

	rows.collect()
}

pub fn load_match_rows(conn: &Connection) -> Result<Vec<MatchRow>> {
	let mut stmt =
		conn.prepare("SELECT match_id, player_id, win FROM matches ORDER BY match_id, win DESC;")?;
	let rows = stmt.query_map([], |row| {
		Ok(MatchRow {
			match_id: row.get(0)?,
			player_id: row.get(1)?,
			win: row.get(2)?,
		})
	})?;

	rows.collect()
}

pub fn delete_matches(conn: &Connection) -> Result<usize> {
	conn.execute("DELETE FROM matches;", [])
}

pub fn delete_players(conn: &Connection) -> Result<usize> {
	conn.execute("DELETE FROM players;", [])
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::db::create_schema;

	fn setup() -> Connection {
		let mut conn = Connection::open_in_memory().unwrap();
		create_schema(&mut conn).unwrap();
		conn
	}

	#[test]
	fn first_match_id_is_one() {
		let conn = setup();
		assert_eq!(next_match_id(&conn).unwrap(), 1);
	}

	#[test]
	fn match_id_follows_the_maximum() {
		let mut conn = setup();
		let a = register_player(&conn, "A").unwrap();
		let b = register_player(&conn, "B").unwrap();

		assert_eq!(report_match(&mut conn, a, b, Utc::now()).unwrap(), 1);
		assert_eq!(report_match(&mut conn, b, a, Utc::now()).unwrap(), 2);
		assert_eq!(next_match_id(&conn).unwrap(), 3);
	}

	#[test]
	fn each_match_is_one_win_and_one_loss() {
		let mut conn = setup();
		let a = register_player(&conn, "A").unwrap();
		let b = register_player(&conn, "B").unwrap();
		report_match(&mut conn, a, b, Utc::now()).unwrap();

		let rows = load_match_rows(&conn).unwrap();
		assert_eq!(
			rows,
			vec![
				MatchRow { match_id: 1, player_id: a, win: true },
				MatchRow { match_id: 1, player_id: b, win: false },
			]
		);
	}

	#[test]
	fn history_pairs_winner_with_loser() {
		let mut conn = setup();
		let a = register_player(&conn, "A").unwrap();
		let b = register_player(&conn, "B").unwrap();
		let when = Utc::now();
		report_match(&mut conn, b, a, when).unwrap();

		let history = match_history(&conn).unwrap();
		assert_eq!(history.len(), 1);
		assert_eq!(history[0].match_id, 1);
		assert_eq!(history[0].winner, b);
		assert_eq!(history[0].loser, a);
		assert_eq!(history[0].reported_at, when);
	}

	#[test]
	fn deletes_report_affected_rows() {
		let mut conn = setup();
		let a = register_player(&conn, "A").unwrap();
		let b = register_player(&conn, "B").unwrap();
		report_match(&mut conn, a, b, Utc::now()).unwrap();

		assert_eq!(delete_matches(&conn).unwrap(), 2);
		assert_eq!(delete_players(&conn).unwrap(), 2);
		assert_eq!(count_players(&conn).unwrap(), 0);
	}
}
