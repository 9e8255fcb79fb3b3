use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::open_dataset;
use crate::error::{GastosError, Result};
use crate::fmt::{money, month_label};
use crate::reports::{get_dashboard, Dashboard, GroupTotal};
use crate::settings::get_db_path;

pub const NO_DATA_INFO: &str = "Nenhuma base carregada ainda.";

fn group_table(header: &str, groups: &[GroupTotal]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header, "Valor"]);
    for g in groups {
        table.add_row(vec![
            Cell::new(g.key.as_deref().unwrap_or("(vazio)")),
            Cell::new(money(g.valor)),
        ]);
    }
    table
}

fn render(dash: &Dashboard) -> String {
    let mut kpis = Table::new();
    kpis.set_header(vec!["Gasto Total", "Meses", "Lançamentos"]);
    kpis.add_row(vec![
        Cell::new(money(dash.total)),
        Cell::new(dash.months),
        Cell::new(dash.entries),
    ]);

    let mut monthly = Table::new();
    monthly.set_header(vec!["Mês", "Valor"]);
    for m in &dash.by_month {
        monthly.add_row(vec![Cell::new(month_label(m.ano, m.mes)), Cell::new(money(m.valor))]);
    }

    format!(
        "{}\n{kpis}\n\n{}\n{monthly}\n\n{}\n{}\n\n{}\n{}",
        "Dashboard de Despesas".bold(),
        "Gasto por Mês".bold(),
        "Gasto por Categoria".bold(),
        group_table("Categoria", &dash.by_category),
        "Gasto por Banco".bold(),
        group_table("Banco", &dash.by_bank),
    )
}

pub fn run(json: bool) -> Result<()> {
    let rows = open_dataset(&get_db_path());
    if rows.is_empty() {
        if json {
            println!("null");
        } else {
            println!("{NO_DATA_INFO}");
        }
        return Ok(());
    }

    let dash = get_dashboard(&rows);
    if json {
        let out = serde_json::to_string_pretty(&dash).map_err(|e| GastosError::Other(e.to_string()))?;
        println!("{out}");
    } else {
        println!("{}", render(&dash));
    }
    Ok(())
}
