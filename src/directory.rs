// 📒 Account Directory - read-only set of account records
//
// The resolver only ever calls find_match, so any source that can answer an
// exact (identifier, name) query can stand in for the static table.
//
// StaticDirectory rejects duplicate keys when it is built: two records with
// the same normalized (identifier, name) would make a lookup ambiguous.

use crate::db;
use crate::entities::AccountRecord;
use crate::error::{FinderError, FinderResult};
use rusqlite::{Connection, OpenFlags};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// DIRECTORY TRAIT
// ============================================================================

/// Exact-match account lookup
pub trait Directory {
    /// Find the record whose normalized identifier AND normalized name equal
    /// the (already normalized) arguments
    fn find_match(&self, normalized_identifier: &str, normalized_name: &str)
        -> Option<&AccountRecord>;
}

impl<D: Directory + ?Sized> Directory for &D {
    fn find_match(
        &self,
        normalized_identifier: &str,
        normalized_name: &str,
    ) -> Option<&AccountRecord> {
        (**self).find_match(normalized_identifier, normalized_name)
    }
}

// ============================================================================
// STATIC DIRECTORY
// ============================================================================

/// In-memory directory, immutable after construction
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    records: Vec<AccountRecord>,
}

impl StaticDirectory {
    /// Build a directory, failing on duplicate (identifier, name) keys
    pub fn new(records: Vec<AccountRecord>) -> FinderResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());

        for record in &records {
            let (identifier, name) = record.key();
            if !seen.insert((identifier.clone(), name.clone())) {
                warn!(identifier = %identifier, "duplicate directory record rejected");
                return Err(FinderError::DuplicateRecord { identifier, name });
            }
        }

        Ok(StaticDirectory { records })
    }

    /// Built-in sample table
    pub fn embedded() -> Self {
        StaticDirectory {
            records: vec![
                AccountRecord::new("30101", "홍길동", "30101.hong@school.example"),
                AccountRecord::new("30102", "김철수", "30102.kim@school.example"),
            ],
        }
    }

    /// Load from a CSV file with header `student_no,name,account_id`
    pub fn from_csv(path: &Path) -> FinderResult<Self> {
        let file = std::fs::File::open(path)?;
        let directory = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            records = directory.len(),
            "loaded directory from CSV"
        );
        Ok(directory)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> FinderResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::None).from_reader(reader);

        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let record: AccountRecord = result?;
            records.push(record);
        }

        Self::new(records)
    }

    /// Load from a SQLite database previously filled by `db::insert_records`
    ///
    /// The file is opened read-only and never created; a missing path is an
    /// `Io` error, the same as for `from_csv`.
    pub fn from_sqlite(path: &Path) -> FinderResult<Self> {
        if !path.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
            .into());
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let records = db::load_records(&conn)?;
        info!(
            path = %path.display(),
            records = records.len(),
            "loaded directory from SQLite"
        );
        Self::new(records)
    }

    /// SHA-256 over the normalized records, in iteration order
    ///
    /// Two directories with the same fingerprint answer every query the same way.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for record in &self.records {
            let (identifier, name) = record.key();
            hasher.update(identifier.as_bytes());
            hasher.update([0x1f]);
            hasher.update(name.as_bytes());
            hasher.update([0x1f]);
            hasher.update(record.account_id.as_bytes());
            hasher.update([0x1e]);
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn records(&self) -> &[AccountRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Directory for StaticDirectory {
    fn find_match(
        &self,
        normalized_identifier: &str,
        normalized_name: &str,
    ) -> Option<&AccountRecord> {
        let found = self
            .records
            .iter()
            .find(|record| record.matches(normalized_identifier, normalized_name));
        debug!(matched = found.is_some(), "directory query");
        found
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_directory() {
        let directory = StaticDirectory::embedded();
        assert_eq!(directory.len(), 2);
        assert!(!directory.is_empty());

        // The built-in table must itself satisfy the uniqueness rule
        assert!(StaticDirectory::new(directory.records().to_vec()).is_ok());
    }

    #[test]
    fn test_find_match() {
        let directory = StaticDirectory::embedded();

        let hong = directory.find_match("30101", "홍길동").unwrap();
        assert_eq!(hong.account_id, "30101.hong@school.example");

        let kim = directory.find_match("30102", "김철수").unwrap();
        assert_eq!(kim.account_id, "30102.kim@school.example");

        assert!(directory.find_match("30101", "김철수").is_none());
        assert!(directory.find_match("99999", "홍길동").is_none());
    }

    #[test]
    fn test_stored_names_are_normalized() {
        let directory =
            StaticDirectory::new(vec![AccountRecord::new(" 40101 ", "이 영 희", "lee")]).unwrap();

        assert_eq!(directory.find_match("40101", "이영희").unwrap().account_id, "lee");
    }

    #[test]
    fn test_duplicate_records_rejected() {
        let result = StaticDirectory::new(vec![
            AccountRecord::new("30101", "홍길동", "first"),
            AccountRecord::new("30101 ", "홍 길동", "second"),
        ]);

        match result {
            Err(FinderError::DuplicateRecord { identifier, name }) => {
                assert_eq!(identifier, "30101");
                assert_eq!(name, "홍길동");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_same_identifier_different_names_allowed() {
        let directory = StaticDirectory::new(vec![
            AccountRecord::new("30101", "홍길동", "a"),
            AccountRecord::new("30101", "홍길순", "b"),
        ])
        .unwrap();

        assert_eq!(directory.find_match("30101", "홍길순").unwrap().account_id, "b");
    }

    #[test]
    fn test_from_csv_reader() {
        let data = "student_no,name,account_id
30201,박 지민,30201.park@school.example
30202,최유리,30202.choi@school.example
";
        let directory = StaticDirectory::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.records()[0].display_name, "박 지민");
        assert_eq!(
            directory.find_match("30201", "박지민").unwrap().account_id,
            "30201.park@school.example"
        );
    }

    #[test]
    fn test_from_csv_reader_rejects_missing_column() {
        let data = "student_no,name\n30201,박지민\n";
        assert!(matches!(
            StaticDirectory::from_csv_reader(data.as_bytes()),
            Err(FinderError::Csv(_))
        ));
    }

    #[test]
    fn test_from_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "student_no,name,account_id").unwrap();
        writeln!(file, "30101,홍길동,30101.hong@school.example").unwrap();

        let directory = StaticDirectory::from_csv(file.path()).unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let result = StaticDirectory::from_csv(Path::new("/nonexistent/accounts.csv"));
        assert!(matches!(result, Err(FinderError::Io(_))));
    }

    #[test]
    fn test_from_sqlite_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.db");

        let result = StaticDirectory::from_sqlite(&path);
        match result {
            Err(FinderError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected io error, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_from_sqlite_reads_imported_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.db");
        {
            let conn = Connection::open(&path).unwrap();
            db::setup_database(&conn).unwrap();
            db::insert_records(&conn, StaticDirectory::embedded().records()).unwrap();
        }

        let directory = StaticDirectory::from_sqlite(&path).unwrap();
        assert_eq!(directory.fingerprint(), StaticDirectory::embedded().fingerprint());
    }

    #[test]
    fn test_fingerprint_stable_and_order_sensitive() {
        let a = StaticDirectory::embedded();
        let b = StaticDirectory::embedded();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let mut reversed = a.records().to_vec();
        reversed.reverse();
        let c = StaticDirectory::new(reversed).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_display_whitespace() {
        let spaced =
            StaticDirectory::new(vec![AccountRecord::new("30101", "홍 길동", "x")]).unwrap();
        let compact =
            StaticDirectory::new(vec![AccountRecord::new("30101", "홍길동", "x")]).unwrap();
        assert_eq!(spaced.fingerprint(), compact.fingerprint());
    }
}
