//! Local breed store backed by SQLite.
//!
//! One `breeds` table keyed by breed id, partitioned by `kind`. Every write
//! runs in a transaction and, once committed, bumps a per-kind revision on a
//! `watch` channel so live queries know to re-run.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use tokio::sync::watch;

use crate::error::{PawError, Result};
use crate::model::Kind;

/// How a refresh treats favorite flags already in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Delete and insert; every favorite flag of the kind is lost.
    Replace,
    /// Delete and insert, re-applying favorite flags to ids that come back.
    #[default]
    KeepFavorites,
}

impl std::str::FromStr for RefreshPolicy {
    type Err = PawError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "replace" => Ok(RefreshPolicy::Replace),
            "keep-favorites" => Ok(RefreshPolicy::KeepFavorites),
            other => Err(PawError::Config(format!("unknown refresh policy: {}", other))),
        }
    }
}

/// A stored breed row.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedRow {
    pub id: String,
    pub kind: Kind,
    pub name: String,
    pub origin: String,
    pub temperament: String,
    pub description: String,
    pub life_span: String,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_favorite: bool,
    pub synced_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, kind, name, origin, temperament, description, life_span, \
                       image_url, images, is_favorite, synced_at";

/// Keyed table of cached breeds with per-kind change notification.
pub struct LocalStore {
    conn: Mutex<Connection>,
    revisions: [watch::Sender<u64>; 2],
}

impl LocalStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            revisions: [watch::channel(0).0, watch::channel(0).0],
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PawError::Other("breed store lock poisoned".to_string()))
    }

    fn notify(&self, kind: Kind) {
        self.revisions[kind.index()].send_modify(|rev| *rev += 1);
    }

    /// Watch the revision counter of a kind. It changes after every
    /// committed write to that kind.
    pub fn subscribe(&self, kind: Kind) -> watch::Receiver<u64> {
        self.revisions[kind.index()].subscribe()
    }

    /// All rows of a kind, ordered by name.
    pub fn list_by_kind(&self, kind: Kind) -> Result<Vec<BreedRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM breeds WHERE kind = ?1 ORDER BY name ASC, id ASC",
            COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![kind.as_str()], row_to_breed)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Favorite rows of a kind, ordered by name.
    pub fn list_favorites_by_kind(&self, kind: Kind) -> Result<Vec<BreedRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM breeds WHERE kind = ?1 AND is_favorite = 1 ORDER BY name ASC, id ASC",
            COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![kind.as_str()], row_to_breed)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn count_by_kind(&self, kind: Kind) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM breeds WHERE kind = ?1",
            params![kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Look up a single row regardless of kind.
    pub fn get_by_id(&self, id: &str) -> Result<Option<BreedRow>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM breeds WHERE id = ?1", COLUMNS),
                params![id],
                row_to_breed,
            )
            .optional()?;
        Ok(row)
    }

    /// Ids currently flagged favorite for a kind.
    #[cfg(test)]
    fn favorite_ids(&self, kind: Kind) -> Result<Vec<String>> {
        let conn = self.lock()?;
        favorite_ids_tx(&conn, kind)
    }

    /// Replace every row of `kind` with `rows` in one transaction.
    ///
    /// Rows whose kind differs from `kind`, or whose id is already taken by
    /// the other kind, are skipped. Returns the number of rows written.
    pub fn bulk_replace(&self, kind: Kind, rows: &[BreedRow], policy: RefreshPolicy) -> Result<usize> {
        let written = {
            let mut conn = self.lock()?;
            let tx = conn.transaction()?;
            let written = bulk_replace_tx(&tx, kind, rows, policy)?;
            tx.commit()?;
            written
        };

        log::info!("Replaced {} rows with {} fetched rows", kind, written);
        self.notify(kind);
        Ok(written)
    }

    /// Set the favorite flag of one row. Returns the row's kind, or `None`
    /// when no row has that id.
    pub fn set_favorite(&self, id: &str, favorite: bool) -> Result<Option<Kind>> {
        let kind: Option<String> = {
            let conn = self.lock()?;
            conn.query_row(
                "UPDATE breeds SET is_favorite = ?2 WHERE id = ?1 RETURNING kind",
                params![id, favorite],
                |row| row.get(0),
            )
            .optional()?
        };

        let Some(kind) = kind else {
            return Ok(None);
        };
        let kind: Kind = kind.parse()?;
        self.notify(kind);
        Ok(Some(kind))
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS breeds (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            origin TEXT NOT NULL,
            temperament TEXT NOT NULL,
            description TEXT NOT NULL,
            life_span TEXT NOT NULL,
            image_url TEXT,
            images TEXT NOT NULL DEFAULT '[]',
            is_favorite INTEGER NOT NULL DEFAULT 0,
            synced_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_breeds_kind ON breeds(kind);
        ",
    )?;
    Ok(())
}

fn favorite_ids_tx(conn: &Connection, kind: Kind) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM breeds WHERE kind = ?1 AND is_favorite = 1")?;
    let ids = stmt
        .query_map(params![kind.as_str()], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

fn bulk_replace_tx(
    tx: &Transaction<'_>,
    kind: Kind,
    rows: &[BreedRow],
    policy: RefreshPolicy,
) -> Result<usize> {
    let kept_favorites = match policy {
        RefreshPolicy::KeepFavorites => favorite_ids_tx(tx, kind)?,
        RefreshPolicy::Replace => Vec::new(),
    };

    tx.execute("DELETE FROM breeds WHERE kind = ?1", params![kind.as_str()])?;

    let mut stmt = tx.prepare_cached(&format!(
        "INSERT OR IGNORE INTO breeds ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        COLUMNS
    ))?;

    let mut written = 0;
    for row in rows {
        if row.kind != kind {
            log::warn!("Skipping {} row {} in {} refresh", row.kind, row.id, kind);
            continue;
        }

        let favorite = row.is_favorite || kept_favorites.contains(&row.id);
        let images = serde_json::to_string(&row.images)?;
        let inserted = stmt.execute(params![
            &row.id,
            row.kind.as_str(),
            &row.name,
            &row.origin,
            &row.temperament,
            &row.description,
            &row.life_span,
            &row.image_url,
            images,
            favorite,
            row.synced_at,
        ])?;

        if inserted == 0 {
            log::warn!("Skipping {} row {}: id already stored", kind, row.id);
        }
        written += inserted;
    }

    Ok(written)
}

fn row_to_breed(row: &Row<'_>) -> rusqlite::Result<BreedRow> {
    let kind: String = row.get(1)?;
    let kind = kind.parse::<Kind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let images: String = row.get(8)?;
    let images = serde_json::from_str(&images).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(BreedRow {
        id: row.get(0)?,
        kind,
        name: row.get(2)?,
        origin: row.get(3)?,
        temperament: row.get(4)?,
        description: row.get(5)?,
        life_span: row.get(6)?,
        image_url: row.get(7)?,
        images,
        is_favorite: row.get(9)?,
        synced_at: row.get(10)?,
    })
}
