use account_finder::{
    db, logging, AccountRecord, DirectorySource, Dubeolsik, FinderConfig, InputMethod,
    LookupResult, Resolver, StaticDirectory, ViewState,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "account-finder",
    version,
    about = "Look up a school account ID by student number and name"
)]
struct Cli {
    /// Directory source: "embedded", a .csv file or a .db file (overrides FINDER_DIRECTORY)
    #[arg(long, global = true)]
    directory: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one student number + name
    Lookup {
        #[arg(allow_hyphen_values = true)]
        identifier: String,
        #[arg(allow_hyphen_values = true)]
        name: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import a CSV directory (student_no,name,account_id) into SQLite
    Import { csv: PathBuf, db: PathBuf },
    /// Show directory size and fingerprint
    List {
        /// Also list identifiers with masked account IDs
        #[arg(long)]
        records: bool,
    },
    /// Convert keystrokes to Hangul (or back with --reverse)
    Convert {
        text: String,
        #[arg(long)]
        reverse: bool,
    },
    /// Interactive lookup form (default)
    Ui,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = FinderConfig::from_env().context("Failed to load configuration")?;
    if let Some(source) = &cli.directory {
        config.directory = DirectorySource::parse(source)?;
    }

    let command = cli.command.unwrap_or(Command::Ui);

    // The TUI owns the terminal; keep log lines off it unless asked for
    match command {
        Command::Ui => logging::init("off"),
        _ => logging::init(&config.log_filter),
    }

    match command {
        Command::Lookup {
            identifier,
            name,
            json,
        } => run_lookup(&config, &identifier, &name, json),
        Command::Import { csv, db } => run_import(&csv, &db).map(|_| ExitCode::SUCCESS),
        Command::List { records } => run_list(&config, records).map(|_| ExitCode::SUCCESS),
        Command::Convert { text, reverse } => {
            let ime = Dubeolsik::new();
            if reverse {
                println!("{}", ime.hangul_to_romanized(&text));
            } else {
                println!("{}", ime.romanized_to_hangul(&text));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Ui => run_ui_mode(&config).map(|_| ExitCode::SUCCESS),
    }
}

fn open_directory(config: &FinderConfig) -> Result<StaticDirectory> {
    config
        .open_directory()
        .with_context(|| format!("Failed to open directory {}", config.directory.describe()))
}

fn run_lookup(config: &FinderConfig, identifier: &str, name: &str, json: bool) -> Result<ExitCode> {
    let resolver = Resolver::new(open_directory(config)?);
    let result = resolver.resolve(identifier, name);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match ViewState::from_result(&result) {
            ViewState::Result { account_id } => println!("✓ {}", account_id),
            ViewState::Error { message } => eprintln!("❌ {}", message),
            ViewState::Prompt => {}
        }
    }

    Ok(match result {
        LookupResult::Found { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn run_import(csv_path: &Path, db_path: &Path) -> Result<()> {
    println!("🗄️  Account Import - CSV → SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load CSV (duplicates are rejected here)
    println!("\n📂 Loading CSV...");
    let directory = StaticDirectory::from_csv(csv_path)
        .with_context(|| format!("Failed to load {}", csv_path.display()))?;
    println!("✓ Loaded {} records from CSV", directory.len());

    // 2. Setup database
    println!("\n🔧 Setting up database...");
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open {}", db_path.display()))?;
    db::setup_database(&conn)?;
    println!("✓ Database initialized with WAL mode");

    // 3. Insert records
    println!("\n💾 Inserting records...");
    let inserted = db::insert_records(&conn, directory.records())?;

    // 4. Verify count
    let count = db::count_records(&conn)?;
    println!("✓ Inserted {} records, database now holds {}", inserted, count);
    println!("✓ Fingerprint: {}", directory.fingerprint());

    Ok(())
}

fn run_list(config: &FinderConfig, show_records: bool) -> Result<()> {
    let directory = open_directory(config)?;

    println!("📒 Directory: {}", config.directory.describe());
    println!("   Records:     {}", directory.len());
    println!("   Fingerprint: {}", directory.fingerprint());

    if show_records {
        println!();
        for record in directory.records() {
            println!(
                "   {:<10} {}",
                record.normalized_identifier(),
                AccountRecord::mask_account_id(&record.account_id)
            );
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &FinderConfig) -> Result<()> {
    use account_finder::ui;

    let directory = open_directory(config)?;
    let mut app = ui::App::new(
        directory,
        config.directory.describe(),
        config.reset_notice.clone(),
    );
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &FinderConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: account-finder lookup <STUDENT_NO> <NAME>");
    std::process::exit(1);
}
