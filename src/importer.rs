use std::path::Path;

use crate::error::{GastosError, Result};
use crate::models::Expense;

// ---------------------------------------------------------------------------
// Raw table: what a CSV or spreadsheet reader hands over before coercion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    /// Already rendered as `YYYY-MM-DD`.
    Date(String),
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lower-case and trim a header; the accented `mês` becomes `mes`.
pub fn normalize_header(raw: &str) -> String {
    let name = raw.trim().to_lowercase();
    if name == "mês" {
        "mes".to_string()
    } else {
        name
    }
}

/// Parse an amount written either way round: `1,234.56`, `1.234,56`,
/// `R$ 29,90`, `(50.00)`. Returns `None` for blanks and garbage.
pub fn parse_valor(raw: &str) -> Option<f64> {
    let s: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != '"')
        .collect();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return parse_valor(inner).map(|v| -v.abs());
    }
    let normalized = match (s.rfind(','), s.rfind('.')) {
        // Comma is the decimal separator: 1.234,56
        (Some(c), Some(d)) if c > d => s.replace('.', "").replace(',', "."),
        (Some(_), None) => s.replace(',', "."),
        _ => s.replace(',', ""),
    };
    normalized.parse().ok().filter(|v: &f64| v.is_finite())
}

#[cfg(any(feature = "xlsx", test))]
pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    chrono::NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|base| (base + chrono::Duration::days(serial as i64)).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn cell_text(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Empty => None,
        RawCell::Text(s) if s.trim().is_empty() => None,
        RawCell::Text(s) => Some(s.clone()),
        RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
        RawCell::Number(n) => Some(n.to_string()),
        RawCell::Date(d) => Some(d.clone()),
    }
}

fn cell_valor(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) if n.is_finite() => Some(*n),
        RawCell::Text(s) => parse_valor(s),
        _ => None,
    }
}

fn cell_int(cell: &RawCell) -> Option<i64> {
    let n = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(i);
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    (n.is_finite() && n.fract() == 0.0).then_some(n as i64)
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Data,
    Descricao,
    Valor,
    Banco,
    Categoria,
    Status,
    Parcelas,
    Ano,
    Mes,
}

impl Column {
    fn from_header(name: &str) -> Option<Self> {
        Some(match name {
            "data" => Self::Data,
            "descricao" => Self::Descricao,
            "valor" => Self::Valor,
            "banco" => Self::Banco,
            "categoria" => Self::Categoria,
            "status" => Self::Status,
            "parcelas" => Self::Parcelas,
            "ano" => Self::Ano,
            "mes" => Self::Mes,
            _ => return None,
        })
    }

    fn assign(self, expense: &mut Expense, cell: &RawCell) {
        match self {
            Self::Data => expense.data = cell_text(cell),
            Self::Descricao => expense.descricao = cell_text(cell),
            Self::Valor => expense.valor = cell_valor(cell),
            Self::Banco => expense.banco = cell_text(cell),
            Self::Categoria => expense.categoria = cell_text(cell),
            Self::Status => expense.status = cell_text(cell),
            Self::Parcelas => expense.parcelas = cell_text(cell),
            Self::Ano => expense.ano = cell_int(cell),
            Self::Mes => expense.mes = cell_int(cell),
        }
    }
}

/// Map a raw table onto expense rows by (normalized) header name.
pub fn table_to_expenses(table: &RawTable) -> Vec<Expense> {
    let mut columns: Vec<(usize, Column)> = Vec::new();
    for (i, header) in table.headers.iter().enumerate() {
        let name = normalize_header(header);
        match Column::from_header(&name) {
            Some(col) if !columns.iter().any(|(_, c)| *c == col) => columns.push((i, col)),
            Some(_) => tracing::debug!(header = %name, "duplicate column ignored"),
            None => tracing::debug!(header = %name, "unknown column ignored"),
        }
    }

    table
        .rows
        .iter()
        .map(|row| {
            let mut expense = Expense::default();
            for (i, col) in &columns {
                if let Some(cell) = row.get(*i) {
                    col.assign(&mut expense, cell);
                }
            }
            expense
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadFormat {
    Csv,
    #[cfg(feature = "xlsx")]
    Spreadsheet,
}

impl UploadFormat {
    pub fn detect(file_path: &Path) -> Result<Self> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            #[cfg(feature = "xlsx")]
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(GastosError::UnsupportedFormat(file_path.display().to_string())),
        }
    }

    pub fn read(&self, file_path: &Path) -> Result<RawTable> {
        match self {
            Self::Csv => read_csv(file_path),
            #[cfg(feature = "xlsx")]
            Self::Spreadsheet => read_spreadsheet(file_path),
        }
    }
}

fn read_csv(file_path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|f| {
                    if f.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(f.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(RawTable { headers, rows })
}

#[cfg(feature = "xlsx")]
fn read_spreadsheet(file_path: &Path) -> Result<RawTable> {
    use calamine::{Data, Reader};

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| GastosError::Spreadsheet(format!("Failed to open {}: {e}", file_path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GastosError::Spreadsheet("Workbook has no worksheets".to_string()))?
        .map_err(|e| GastosError::Spreadsheet(e.to_string()))?;

    let convert = |cell: &Data| match cell {
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) | Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::Date(excel_serial_to_date(dt.as_f64())),
        _ => RawCell::Empty,
    };

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|c| match convert(c) {
                    RawCell::Text(s) | RawCell::Date(s) => s,
                    RawCell::Number(n) => n.to_string(),
                    RawCell::Empty => String::new(),
                })
                .collect()
        })
        .unwrap_or_default();
    let rows = rows.map(|row| row.iter().map(convert).collect()).collect();
    Ok(RawTable { headers, rows })
}

/// Read an uploaded file into expense rows. Nothing is written.
pub fn read_upload(file_path: &Path) -> Result<Vec<Expense>> {
    let format = UploadFormat::detect(file_path)?;
    let table = format.read(file_path)?;
    tracing::debug!(?format, headers = ?table.headers, rows = table.rows.len(), "read upload");
    Ok(table_to_expenses(&table))
}
