// Account Finder - Core Library
// Exposes the lookup core for use in the CLI, TUI, API server, and tests

pub mod config;
pub mod db;
pub mod directory;
pub mod entities;
pub mod error;
pub mod ime;
pub mod logging;
pub mod normalize;
pub mod resolver;
pub mod view;

#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::{DirectorySource, FinderConfig};
pub use db::{count_records, insert_records, load_records, setup_database};
pub use directory::{Directory, StaticDirectory};
pub use entities::AccountRecord;
pub use error::{FinderError, FinderResult};
pub use ime::{Dubeolsik, InputMethod};
pub use normalize::{
    is_numeric_identifier, normalize_identifier, normalize_name, normalize_name_smart,
};
pub use resolver::{InvalidReason, LookupQuery, LookupResult, Resolver};
pub use view::{Field, LookupForm, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
