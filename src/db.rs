use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use crate::sources::SignType;

/// Open the store: in-memory by default (one-shot runs), file-backed when a
/// path is given so `export` and `stats` can run against it later.
pub fn connect(path: Option<&Path>) -> Result<Connection> {
    let conn = match path {
        Some(p) => {
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open(p)?
        }
        None => Connection::open_in_memory()?,
    };
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS PANNEAUX (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT,
            type        TEXT NOT NULL,
            source_url  TEXT NOT NULL,
            image_url   TEXT,
            image_path  TEXT,
            UNIQUE(name, type) ON CONFLICT IGNORE
        );
        ",
    )?;
    Ok(())
}

/// One fully-built sign entry, ready to persist. `image_path` is filled in
/// after a successful download, and stays None when the download failed or was
/// skipped.
#[derive(Debug, Clone)]
pub struct PanneauRecord {
    pub name: String,
    pub description: String,
    pub sign_type: SignType,
    pub source_url: String,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

/// Insert records, silently ignoring `(name, type)` duplicates. Returns how
/// many rows were actually inserted.
pub fn insert_panneaux(conn: &Connection, records: &[PanneauRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO PANNEAUX
             (name, description, type, source_url, image_url, image_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for r in records {
            inserted += stmt.execute(rusqlite::params![
                r.name,
                r.description,
                r.sign_type.as_str(),
                r.source_url,
                r.image_url,
                r.image_path,
            ])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

// ── Export ──

pub struct ExportRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sign_type: String,
    pub source_url: String,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
}

/// All rows in export order: `(type, name)`.
pub fn fetch_all(conn: &Connection) -> Result<Vec<ExportRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, type, source_url, image_url, image_path
         FROM PANNEAUX ORDER BY type, name",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ExportRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                sign_type: row.get(3)?,
                source_url: row.get(4)?,
                image_url: row.get(5)?,
                image_path: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub liste: usize,
    pub dynamique: usize,
    pub with_image_url: usize,
    pub downloaded: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<usize> {
        Ok(conn.query_row(sql, [], |r| r.get(0))?)
    };
    Ok(Stats {
        total: count("SELECT COUNT(*) FROM PANNEAUX")?,
        liste: count("SELECT COUNT(*) FROM PANNEAUX WHERE type = 'liste_des_panneaux'")?,
        dynamique: count(
            "SELECT COUNT(*) FROM PANNEAUX WHERE type = 'signalisation_dynamique'",
        )?,
        with_image_url: count("SELECT COUNT(*) FROM PANNEAUX WHERE image_url IS NOT NULL")?,
        downloaded: count("SELECT COUNT(*) FROM PANNEAUX WHERE image_path IS NOT NULL")?,
    })
}

// ── Tests ──
