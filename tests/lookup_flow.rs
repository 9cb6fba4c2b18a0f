// End-to-end: CSV → SQLite → directory → resolver → view state

use account_finder::{
    insert_records, setup_database, AccountRecord, DirectorySource, FinderConfig, FinderError,
    InvalidReason, LookupForm, LookupResult, Resolver, StaticDirectory, ViewState,
};
use rusqlite::Connection;
use std::io::Write;

const CSV: &str = "student_no,name,account_id
30101,홍길동,30101.hong@school.example
30102,김 철수,30102.kim@school.example
30201,박지민,30201.park@school.example
";

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("accounts.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_csv_directory_resolves_all_input_styles() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, CSV);

    let resolver = Resolver::new(StaticDirectory::from_csv(&path).unwrap());
    let expected = LookupResult::Found {
        account_id: "30102.kim@school.example".to_string(),
    };

    assert_eq!(resolver.resolve("30102", "김철수"), expected);
    assert_eq!(resolver.resolve(" 30102 ", "김 철 수"), expected);
    assert_eq!(resolver.resolve("30102", "rlacjftn"), expected);
    assert_eq!(resolver.resolve("30102", "ㄱㅣㅁㅊㅓㄹㅅㅜ"), expected);

    assert_eq!(resolver.resolve("30101", "박지민"), LookupResult::NotFound);
    assert_eq!(
        resolver.resolve("3O1O1", "홍길동"),
        LookupResult::Invalid {
            reason: InvalidReason::IdentifierNotNumeric
        }
    );
}

#[test]
fn test_sqlite_import_matches_csv_directory() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write_csv(&dir, CSV);
    let db_path = dir.path().join("accounts.db");

    let from_csv = StaticDirectory::from_csv(&csv_path).unwrap();
    {
        let conn = Connection::open(&db_path).unwrap();
        setup_database(&conn).unwrap();
        assert_eq!(insert_records(&conn, from_csv.records()).unwrap(), 3);
    }

    let source = DirectorySource::parse(db_path.to_str().unwrap()).unwrap();
    let from_db = source.open().unwrap();

    assert_eq!(from_db.records(), from_csv.records());
    assert_eq!(from_db.fingerprint(), from_csv.fingerprint());
}

#[test]
fn test_duplicate_csv_rows_fail_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "student_no,name,account_id\n30101,홍길동,a@x\n30101,홍 길동,b@x\n",
    );

    assert!(matches!(
        StaticDirectory::from_csv(&path),
        Err(FinderError::DuplicateRecord { .. })
    ));
}

#[test]
fn test_config_selects_csv_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, CSV);
    let path_str = path.to_str().unwrap().to_string();

    let config = FinderConfig::from_lookup(|key| match key {
        "FINDER_DIRECTORY" => Some(path_str.clone()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.open_directory().unwrap().len(), 3);
}

#[test]
fn test_form_walkthrough() {
    let resolver = Resolver::new(StaticDirectory::embedded());
    let mut form = LookupForm::new();
    assert_eq!(form.view(), &ViewState::Prompt);

    form.identifier = "30101".to_string();
    form.name = "ghdrlfehd".to_string();
    let view = form.submit(&resolver).clone();
    assert_eq!(
        view,
        ViewState::Result {
            account_id: "30101.hong@school.example".to_string()
        }
    );

    form.reset();
    assert_eq!(form.view(), &ViewState::Prompt);
    assert_eq!(form.view().account_display(), "-");
}

#[test]
fn test_embedded_record_is_immutable_value() {
    let directory = StaticDirectory::embedded();
    let first: &AccountRecord = &directory.records()[0];
    assert_eq!(first.identifier, "30101");
    assert_eq!(first.display_name, "홍길동");
}
