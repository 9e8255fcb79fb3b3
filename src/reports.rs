use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{Expense, ExpenseFilter};

// ---------------------------------------------------------------------------
// Filtered sum
// ---------------------------------------------------------------------------

fn matches(row: &Expense, filter: &ExpenseFilter) -> bool {
    if let Some(mes) = filter.mes {
        if row.mes != Some(mes) {
            return false;
        }
    }
    if let Some(ano) = filter.ano {
        if row.ano != Some(ano) {
            return false;
        }
    }
    if let Some(categoria) = &filter.categoria {
        let needle = categoria.to_lowercase();
        match &row.categoria {
            Some(c) if c.to_lowercase().contains(&needle) => {}
            _ => return false,
        }
    }
    true
}

/// Missing amounts count as zero.
fn total<'a>(rows: impl IntoIterator<Item = &'a Expense>) -> f64 {
    rows.into_iter().filter_map(|r| r.valor).sum()
}

/// Sum `valor` over the rows matching every constraint in `filter`.
pub fn sum_filtered(rows: &[Expense], filter: &ExpenseFilter) -> f64 {
    let matched: Vec<&Expense> = rows.iter().filter(|r| matches(r, filter)).collect();
    tracing::debug!(?filter, matched = matched.len(), of = rows.len(), "filtered");
    total(matched)
}

// ---------------------------------------------------------------------------
// Group-by summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub ano: Option<i64>,
    pub mes: Option<i64>,
    pub valor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    /// `None` collects the rows where the key column was blank.
    pub key: Option<String>,
    pub valor: f64,
}

/// Totals per (ano, mes), ascending by year then month.
pub fn group_by_month_year(rows: &[Expense]) -> Vec<MonthTotal> {
    let mut groups: BTreeMap<(Option<i64>, Option<i64>), f64> = BTreeMap::new();
    for row in rows {
        *groups.entry((row.ano, row.mes)).or_default() += row.valor.unwrap_or(0.0);
    }
    groups
        .into_iter()
        .map(|((ano, mes), valor)| MonthTotal { ano, mes, valor })
        .collect()
}

fn group_by_key(rows: &[Expense], key: impl Fn(&Expense) -> Option<&String>) -> Vec<GroupTotal> {
    let mut groups: BTreeMap<Option<String>, f64> = BTreeMap::new();
    for row in rows {
        *groups.entry(key(row).cloned()).or_default() += row.valor.unwrap_or(0.0);
    }
    groups
        .into_iter()
        .map(|(key, valor)| GroupTotal { key, valor })
        .collect()
}

pub fn group_by_category(rows: &[Expense]) -> Vec<GroupTotal> {
    group_by_key(rows, |r| r.categoria.as_ref())
}

pub fn group_by_bank(rows: &[Expense]) -> Vec<GroupTotal> {
    group_by_key(rows, |r| r.banco.as_ref())
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total: f64,
    pub months: usize,
    pub entries: usize,
    pub by_month: Vec<MonthTotal>,
    pub by_category: Vec<GroupTotal>,
    pub by_bank: Vec<GroupTotal>,
}

pub fn get_dashboard(rows: &[Expense]) -> Dashboard {
    let months: BTreeSet<(Option<i64>, Option<i64>)> = rows.iter().map(|r| (r.ano, r.mes)).collect();
    Dashboard {
        total: total(rows),
        months: months.len(),
        entries: rows.len(),
        by_month: group_by_month_year(rows),
        by_category: group_by_category(rows),
        by_bank: group_by_bank(rows),
    }
}
