use rusqlite::{Connection, Result};

/// Creates the `players` and `matches` tables and the `leader_board` view.
///
/// Safe to run against an existing database. Foreign keys are declared but
/// only enforced on connections that leave the `foreign_keys` pragma on;
/// [`crate::storage`] switches it off.
pub fn create_schema(conn: &mut Connection) -> Result<()> {
	let tx = conn.transaction()?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS players (
			id     INTEGER PRIMARY KEY AUTOINCREMENT,
			name   TEXT    NOT NULL
		);",
		[],
	)?;

	tx.execute(
		"CREATE TABLE IF NOT EXISTS matches (
			match_id      INTEGER NOT NULL,
			player_id     INTEGER REFERENCES players (id)
								  NOT NULL,
			win           INTEGER NOT NULL,
			reported_at   TEXT    NOT NULL
		);",
		[],
	)?;

	// One row per player; the left join keeps players without matches at 0/0.
	tx.execute(
		"CREATE VIEW IF NOT EXISTS leader_board AS
			SELECT players.id                        AS id,
				   players.name                      AS name,
				   COALESCE(SUM(matches.win), 0)     AS wins,
				   COUNT(matches.player_id)          AS matches
			  FROM players
			  LEFT JOIN matches ON players.id = matches.player_id
			 GROUP BY players.id, players.name;",
		[],
	)?;

	tx.commit()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn object_names(conn: &Connection) -> Vec<(String, String)> {
		let mut stmt = conn
			.prepare("SELECT type, name FROM sqlite_master WHERE name NOT LIKE 'sqlite_%' ORDER BY name;")
			.unwrap();
		stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
			.unwrap()
			.map(|r| r.unwrap())
			.collect()
	}

	#[test]
	fn creates_tables_and_view() {
		let mut conn = Connection::open_in_memory().unwrap();
		create_schema(&mut conn).unwrap();

		assert_eq!(
			object_names(&conn),
			vec![
				("view".to_string(), "leader_board".to_string()),
				("table".to_string(), "matches".to_string()),
				("table".to_string(), "players".to_string()),
			]
		);
	}

	#[test]
	fn schema_creation_is_idempotent() {
		let mut conn = Connection::open_in_memory().unwrap();
		create_schema(&mut conn).unwrap();
		create_schema(&mut conn).unwrap();

		assert_eq!(object_names(&conn).len(), 3);
	}

	#[test]
	fn missing_view_surfaces_as_query_error() {
		let conn = Connection::open_in_memory().unwrap();
		assert!(conn.prepare("SELECT * FROM leader_board;").is_err());
	}
}
