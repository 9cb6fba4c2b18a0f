// ⚙️ Configuration - environment variables and directory source

use crate::directory::StaticDirectory;
use crate::error::{FinderError, FinderResult};
use crate::view::DEFAULT_RESET_NOTICE;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the account directory is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    /// Built-in sample table
    Embedded,
    /// CSV file with header `student_no,name,account_id`
    Csv(PathBuf),
    /// SQLite database written by `account-finder import`
    Sqlite(PathBuf),
}

impl DirectorySource {
    /// Parse "embedded" or a path; the file extension picks the format
    pub fn parse(value: &str) -> FinderResult<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("embedded") {
            return Ok(DirectorySource::Embedded);
        }

        let path = PathBuf::from(value);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(DirectorySource::Csv(path)),
            Some("db") | Some("sqlite") | Some("sqlite3") => Ok(DirectorySource::Sqlite(path)),
            _ => Err(FinderError::Config {
                field: "FINDER_DIRECTORY".to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn open(&self) -> FinderResult<StaticDirectory> {
        match self {
            DirectorySource::Embedded => Ok(StaticDirectory::embedded()),
            DirectorySource::Csv(path) => StaticDirectory::from_csv(path),
            DirectorySource::Sqlite(path) => StaticDirectory::from_sqlite(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DirectorySource::Embedded => "embedded".to_string(),
            DirectorySource::Csv(path) | DirectorySource::Sqlite(path) => {
                path.display().to_string()
            }
        }
    }
}

/// Main configuration
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub directory: DirectorySource,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub reset_notice: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            directory: DirectorySource::Embedded,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_filter: "account_finder=info".to_string(),
            reset_notice: DEFAULT_RESET_NOTICE.to_string(),
        }
    }
}

impl FinderConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> FinderResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> FinderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FinderConfig::default();

        let directory = match lookup("FINDER_DIRECTORY") {
            Some(value) => DirectorySource::parse(&value)?,
            None => defaults.directory,
        };

        let bind_addr = match lookup("FINDER_BIND_ADDR") {
            Some(value) => value.trim().parse().map_err(|_| FinderError::Config {
                field: "FINDER_BIND_ADDR".to_string(),
                value,
            })?,
            None => defaults.bind_addr,
        };

        let log_filter = lookup("FINDER_LOG").unwrap_or(defaults.log_filter);
        let reset_notice = lookup("FINDER_RESET_NOTICE").unwrap_or(defaults.reset_notice);

        Ok(FinderConfig {
            directory,
            bind_addr,
            log_filter,
            reset_notice,
        })
    }

    pub fn open_directory(&self) -> FinderResult<StaticDirectory> {
        self.directory.open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> FinderResult<FinderConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FinderConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.directory, DirectorySource::Embedded);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.log_filter, "account_finder=info");
        assert_eq!(config.reset_notice, DEFAULT_RESET_NOTICE);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FINDER_DIRECTORY", "/data/accounts.csv"),
            ("FINDER_BIND_ADDR", "127.0.0.1:8080"),
            ("FINDER_LOG", "debug"),
            ("FINDER_RESET_NOTICE", "Ask the office."),
        ])
        .unwrap();

        assert_eq!(
            config.directory,
            DirectorySource::Csv(PathBuf::from("/data/accounts.csv"))
        );
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.reset_notice, "Ask the office.");
    }

    #[test]
    fn test_directory_source_parse() {
        assert_eq!(DirectorySource::parse("embedded").unwrap(), DirectorySource::Embedded);
        assert_eq!(DirectorySource::parse("EMBEDDED").unwrap(), DirectorySource::Embedded);
        assert_eq!(DirectorySource::parse("").unwrap(), DirectorySource::Embedded);
        assert_eq!(
            DirectorySource::parse("accounts.DB").unwrap(),
            DirectorySource::Sqlite(PathBuf::from("accounts.DB"))
        );
        assert_eq!(
            DirectorySource::parse("a.sqlite3").unwrap(),
            DirectorySource::Sqlite(PathBuf::from("a.sqlite3"))
        );
        assert!(matches!(
            DirectorySource::parse("accounts.json"),
            Err(FinderError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let result = config_from(&[("FINDER_BIND_ADDR", "not-an-addr")]);
        match result {
            Err(FinderError::Config { field, value }) => {
                assert_eq!(field, "FINDER_BIND_ADDR");
                assert_eq!(value, "not-an-addr");
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_embedded_directory() {
        let config = FinderConfig::default();
        assert_eq!(config.open_directory().unwrap().len(), 2);
        assert_eq!(config.directory.describe(), "embedded");
    }
}
