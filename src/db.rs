// 🗄️ SQLite account store
//
// `import` writes a CSV directory into SQLite once; at startup the records are
// read back (in insertion order) into a StaticDirectory. Lookups never touch
// the database.

use crate::entities::AccountRecord;
use crate::error::{FinderError, FinderResult};
use rusqlite::{params, Connection, ErrorCode};
use tracing::info;

pub fn setup_database(conn: &Connection) -> FinderResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // Normalized columns carry the uniqueness rule so the store can never hold
    // an ambiguous key
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_no TEXT NOT NULL,
            name TEXT NOT NULL,
            account_id TEXT NOT NULL,
            normalized_student_no TEXT NOT NULL,
            normalized_name TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (normalized_student_no, normalized_name)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_accounts_student_no ON accounts(normalized_student_no)",
        [],
    )?;

    Ok(())
}

/// Insert all records in one transaction; a duplicate key aborts the whole batch
pub fn insert_records(conn: &Connection, records: &[AccountRecord]) -> FinderResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO accounts (
                student_no, name, account_id, normalized_student_no, normalized_name
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for record in records {
            let (identifier, name) = record.key();
            let result = stmt.execute(params![
                record.identifier,
                record.display_name,
                record.account_id,
                identifier,
                name,
            ]);

            match result {
                Ok(_) => inserted += 1,
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    return Err(FinderError::DuplicateRecord { identifier, name });
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    tx.commit()?;
    info!(inserted, "inserted account records");

    Ok(inserted)
}

/// All records in insertion order
pub fn load_records(conn: &Connection) -> FinderResult<Vec<AccountRecord>> {
    let mut stmt =
        conn.prepare("SELECT student_no, name, account_id FROM accounts ORDER BY id")?;

    let rows = stmt.query_map([], |row| {
        Ok(AccountRecord {
            identifier: row.get(0)?,
            display_name: row.get(1)?,
            account_id: row.get(2)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }

    Ok(records)
}

pub fn count_records(conn: &Connection) -> FinderResult<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================
