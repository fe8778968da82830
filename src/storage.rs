use std::{
	cell::RefCell,
	path::{Path, PathBuf},
};

use rusqlite::{Connection, Result};
use tracing::debug;

/// Hands out a connection for the duration of one operation.
pub trait Storage {
	fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T>;
}

/// The bundled SQLite enforces foreign keys by default. Matches may name
/// players that were never registered or have since been deleted, so
/// enforcement is switched off on every connection.
fn relax_foreign_keys(conn: &Connection) -> Result<()> {
	conn.pragma_update(None, "foreign_keys", false)
}

/// A database file. Every call opens a fresh connection and closes it again.
#[derive(Debug, Clone)]
pub struct FileStorage {
	path: PathBuf,
}

impl FileStorage {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		FileStorage { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Storage for FileStorage {
	fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
		let mut conn = Connection::open(self.path())?;
		relax_foreign_keys(&conn)?;
		debug!(path = %self.path().display(), "opened connection");

		let value = f(&mut conn)?;
		conn.close().map_err(|(_, e)| e)?;

		Ok(value)
	}
}

/// A private in-memory database, kept open for as long as the value lives.
#[derive(Debug)]
pub struct MemoryStorage {
	conn: RefCell<Connection>,
}

impl MemoryStorage {
	pub fn new() -> Result<Self> {
		let conn = Connection::open_in_memory()?;
		relax_foreign_keys(&conn)?;
		debug!("opened in-memory database");

		Ok(MemoryStorage {
			conn: RefCell::new(conn),
		})
	}
}

impl Storage for MemoryStorage {
	fn with_connection<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
		f(&mut self.conn.borrow_mut())
	}
}
