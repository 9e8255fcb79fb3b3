pub mod ask;
pub mod dashboard;
pub mod init;
pub mod load;
pub mod status;
pub mod upload;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gastos", about = "Expense dashboard: upload a spreadsheet, ask how much you spent.")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up gastos: choose a data directory and create the database.
    Init {
        /// Path for gastos data (default: ~/Documents/gastos)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Upload a CSV/XLSX file. Replaces the current data entirely.
    Upload {
        /// Path to the CSV or XLSX file
        file: String,
    },
    /// Ask a question, e.g. "Quanto gastei no mes 2 de 2025 com assinaturas?"
    Ask {
        question: String,
    },
    /// Show totals and the per-month, per-category and per-bank summaries.
    Dashboard {
        /// Emit the summaries as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Switch to an existing gastos data directory.
    Load {
        /// Path to data directory containing financeiro.db
        path: String,
    },
    /// Show current database and row count.
    Status,
}
