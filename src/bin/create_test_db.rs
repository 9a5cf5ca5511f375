use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use transaction_tracker::{
    NewTransaction, SQLiteTransactionStore, TransactionStore, TransactionType, initialize_db,
};

/// A utility for creating a test database for the transaction tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));

    println!("Creating test transactions...");

    let samples = [
        (TransactionType::Income, "Salary", "2024-01-01", 3200.0),
        (TransactionType::Expense, "Rent", "2024-01-02", 1450.0),
        (TransactionType::Expense, "Groceries", "2024-01-05", 182.37),
        (TransactionType::Expense, "Coffee", "2024-01-06", 4.5),
        (TransactionType::Income, "Refund", "2024-01-09", 24.99),
    ];

    for (transaction_type, description, date, amount) in samples {
        let id = store.create(&NewTransaction {
            transaction_type,
            description: description.to_owned(),
            date: date.to_owned(),
            amount,
        })?;
        println!("  {id}: {transaction_type} {description} {amount:.2}");
    }

    println!("Success!");

    Ok(())
}
