use serde::Serialize;

/// One row of the `despesas` table. Every column may be missing: uploads are
/// not validated beyond header renaming.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Expense {
    pub data: Option<String>,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub banco: Option<String>,
    pub categoria: Option<String>,
    pub status: Option<String>,
    pub parcelas: Option<String>,
    pub ano: Option<i64>,
    pub mes: Option<i64>,
}

/// Constraints extracted from a free-text question. `None` means no
/// constraint on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseFilter {
    pub mes: Option<i64>,
    pub ano: Option<i64>,
    pub categoria: Option<String>,
}

impl ExpenseFilter {
    /// True when the filter matches every row.
    pub fn is_empty(&self) -> bool {
        self.mes.is_none() && self.ano.is_none() && self.categoria.is_none()
    }
}
