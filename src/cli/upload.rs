use std::path::PathBuf;

use colored::Colorize;

use crate::db::{get_connection, replace_expenses, DB_FILE};
use crate::error::Result;
use crate::importer::read_upload;
use crate::settings::get_data_dir;

pub fn run(file: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    // Parse everything before touching the store
    let rows = read_upload(&file_path)?;

    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let conn = get_connection(&data_dir.join(DB_FILE))?;
    let count = replace_expenses(&conn, &rows)?;
    tracing::info!(file = %file_path.display(), rows = count, "upload replaced dataset");

    println!(
        "{}",
        "Base carregada com sucesso! A base anterior foi substituída.".green()
    );
    println!("{count} lançamentos carregados");
    Ok(())
}
