//! Shared SQLite PRAGMA bootstrap applied to every connection in this crate

use rusqlite::Connection;

/// Apply the standard connection PRAGMAs (WAL journal, NORMAL sync,
/// in-memory temp store, mmap, larger page cache, WAL autocheckpoint).
pub fn apply_optimized_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    conn.pragma_update(None, "mmap_size", 268_435_456_i64)?;
    conn.pragma_update(None, "cache_size", -64_000_i64)?;
    conn.pragma_update(None, "wal_autocheckpoint", 1_000_i64)?;
    Ok(())
}
