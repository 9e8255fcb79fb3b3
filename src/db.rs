use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::Expense;

pub const DB_FILE: &str = "financeiro.db";

const CREATE_DESPESAS: &str = "
CREATE TABLE IF NOT EXISTS despesas (
    data TEXT,
    descricao TEXT,
    valor REAL,
    banco TEXT,
    categoria TEXT,
    status TEXT,
    parcelas TEXT,
    ano INTEGER,
    mes INTEGER
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_DESPESAS)?;
    Ok(())
}

/// Discard the current dataset and install `rows` in its place.
///
/// Drop, create and bulk insert run in a single transaction: if any insert
/// fails the previous generation is still there.
pub fn replace_expenses(conn: &Connection, rows: &[Expense]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("DROP TABLE IF EXISTS despesas;")?;
    tx.execute_batch(CREATE_DESPESAS)?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO despesas (data, descricao, valor, banco, categoria, status, parcelas, ano, mes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for row in rows {
            stmt.execute(rusqlite::params![
                row.data,
                row.descricao,
                row.valor,
                row.banco,
                row.categoria,
                row.status,
                row.parcelas,
                row.ano,
                row.mes,
            ])?;
        }
    }
    tx.commit()?;
    tracing::debug!(rows = rows.len(), "replaced despesas");
    Ok(rows.len())
}

/// Read the whole dataset, in storage order.
pub fn try_load_expenses(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT data, descricao, valor, banco, categoria, status, parcelas, ano, mes \
         FROM despesas ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Expense {
            data: row.get(0)?,
            descricao: row.get(1)?,
            valor: row.get(2)?,
            banco: row.get(3)?,
            categoria: row.get(4)?,
            status: row.get(5)?,
            parcelas: row.get(6)?,
            ano: row.get(7)?,
            mes: row.get(8)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Read the whole dataset, treating any failure as "nothing loaded yet".
pub fn load_expenses(conn: &Connection) -> Vec<Expense> {
    match try_load_expenses(conn) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("could not read despesas, using an empty dataset: {e}");
            Vec::new()
        }
    }
}

/// Open the database at `db_path` and load it. A missing or unreadable
/// database yields an empty dataset.
pub fn open_dataset(db_path: &Path) -> Vec<Expense> {
    if !db_path.exists() {
        tracing::debug!(path = %db_path.display(), "no database yet");
        return Vec::new();
    }
    match get_connection(db_path) {
        Ok(conn) => load_expenses(&conn),
        Err(e) => {
            tracing::warn!("could not open {}: {e}", db_path.display());
            Vec::new()
        }
    }
}

pub fn count_expenses(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM despesas", [], |r| r.get(0))?)
}
