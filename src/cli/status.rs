use crate::db::{count_expenses, get_connection};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{get_data_dir, get_db_path};

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let db_path = get_db_path();

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let rows = count_expenses(&conn).unwrap_or_else(|e| {
            tracing::warn!("could not count despesas: {e}");
            0
        });
        println!();
        println!("Lançamentos:  {rows}");
    } else {
        println!();
        println!("Database not found. Run `gastos init` or `gastos upload` to set up.");
    }

    Ok(())
}
