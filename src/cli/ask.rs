use colored::Colorize;

use crate::db::open_dataset;
use crate::error::Result;
use crate::fmt::money;
use crate::query::interpret;
use crate::reports::sum_filtered;
use crate::settings::get_db_path;

pub const NO_DATA_WARNING: &str = "Carregue uma base primeiro.";

pub fn run(question: &str) -> Result<()> {
    if question.is_empty() {
        return Ok(());
    }
    let rows = open_dataset(&get_db_path());
    if rows.is_empty() {
        println!("{}", NO_DATA_WARNING.yellow());
        return Ok(());
    }

    let filter = interpret(question);
    if filter.is_empty() {
        tracing::debug!("no month, year or category recognized; summing everything");
    } else {
        tracing::debug!(?filter, "interpreted question");
    }
    let total = sum_filtered(&rows, &filter);
    println!("Você gastou {}", money(total).green().bold());
    Ok(())
}
