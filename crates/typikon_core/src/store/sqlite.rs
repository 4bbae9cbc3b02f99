use super::{ContentStore, StoreError, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

const REQUIRED_TABLE: &str = "documents";

/// Documents stored in the `documents` table of a migrated database.
pub struct SqliteContentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentStore<'conn> {
    /// Wraps a connection returned by `db::open_db` or `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - Returns `StoreError::InvalidBundle` when the `documents` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let table: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                params![REQUIRED_TABLE],
                |row| row.get(0),
            )
            .optional()?;

        if table.is_none() {
            error!(
                "event=store_open module=store status=error mode=sqlite error_code=missing_table table={}",
                REQUIRED_TABLE
            );
            return Err(StoreError::InvalidBundle(format!(
                "database has no `{REQUIRED_TABLE}` table"
            )));
        }

        info!("event=store_open module=store status=ok mode=sqlite");
        Ok(Self { conn })
    }

    /// Inserts or replaces the document at `path`.
    pub fn put_document(&self, path: &str, text: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO documents (path, body) VALUES (?1, ?2)
             ON CONFLICT(path) DO UPDATE SET body = excluded.body;",
            params![path, text],
        )?;
        Ok(())
    }

    pub fn document_count(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl ContentStore for SqliteContentStore<'_> {
    fn has(&self, path: &str) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM documents WHERE path = ?1;",
                params![path],
                |_| Ok(()),
            )
            .optional();

        match found {
            Ok(found) => Ok(found.is_some()),
            Err(err) => {
                error!(
                    "event=store_lookup module=store status=error mode=sqlite error_code=query_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn get(&self, path: &str) -> StoreResult<String> {
        self.conn
            .query_row(
                "SELECT body FROM documents WHERE path = ?1;",
                params![path],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }
}
