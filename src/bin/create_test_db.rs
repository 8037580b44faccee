use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_manager::{models::now_local, stores::sqlite::create_app_state};

/// A utility for creating a populated database for manual testing of the
/// budget manager UI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short, default_value = "budget_manager.db")]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;
    let mut state = create_app_state(connection)?;

    println!("Creating test user...");
    let user = state
        .auth
        .register("test", "test@example.com", "test")
        .ok_or("could not create the test user")?;

    println!("Creating test transactions...");
    let now = now_local();
    let samples = [
        ("Salary", 3200.0, "Income"),
        ("Rent", -1200.0, "Housing"),
        ("Groceries", -84.2, "Food"),
        ("Bus pass", -45.0, "Transportation"),
    ];

    for (description, amount, category) in samples {
        state
            .transactions
            .add_transaction(user.id, description, amount, category, Some(now))
            .ok_or("could not create a test transaction")?;
    }

    println!("Success!");

    Ok(())
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("budget_manager.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}
