use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn gastos(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gastos").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_upload(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("despesas.csv");
    std::fs::write(
        &path,
        "Data,Descricao,Valor,Banco,Categoria,Status,Parcelas,Ano,Mês\n\
         2025-02-05,Netflix,29.90,Nubank,Assinaturas,pago,,2025,2\n\
         2025-02-11,Mercado,150.00,Itaú,Mercado,pago,,2025,2\n\
         2025-03-05,Netflix,29.90,Nubank,Assinaturas,pago,,2025,3\n\
         2024-12-20,Uber,40.10,Itaú,Transporte,pendente,,2024,12\n",
    )
    .unwrap();
    path
}

#[cfg(feature = "xlsx")]
fn write_xlsx_upload(dir: &Path) -> std::path::PathBuf {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let path = dir.join("despesas.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Data", "Descricao", "Valor", "Banco", "Categoria", "Ano", "Mês"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let rows = [
        ((2025, 2, 10), "Netflix", 29.9, "Nubank", "Assinaturas", 2025.0, 2.0),
        ((2025, 2, 12), "Mercado", 120.0, "Itaú", "Mercado", 2025.0, 2.0),
        ((2025, 3, 10), "Netflix", 29.9, "Nubank", "Assinaturas", 2025.0, 3.0),
    ];
    for (i, ((y, m, d), desc, valor, banco, categoria, ano, mes)) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
        sheet.write_datetime_with_format(r, 0, &date, &date_format).unwrap();
        sheet.write_string(r, 1, *desc).unwrap();
        sheet.write_number(r, 2, *valor).unwrap();
        sheet.write_string(r, 3, *banco).unwrap();
        sheet.write_string(r, 4, *categoria).unwrap();
        sheet.write_number(r, 5, *ano).unwrap();
        sheet.write_number(r, 6, *mes).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

#[test]
fn ask_before_upload_warns() {
    let home = tempfile::tempdir().unwrap();
    gastos(home.path())
        .args(["ask", "Quanto gastei no mes 2 de 2025 com assinaturas?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carregue uma base primeiro."))
        .stdout(predicate::str::contains("Você gastou").not());
}

#[test]
fn dashboard_before_upload_is_empty() {
    let home = tempfile::tempdir().unwrap();
    gastos(home.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhuma base carregada ainda."));
}

#[test]
fn upload_then_ask() {
    let home = tempfile::tempdir().unwrap();
    let file = write_upload(home.path());
    gastos(home.path())
        .args(["upload", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base carregada com sucesso!"))
        .stdout(predicate::str::contains("4 lançamentos"));

    gastos(home.path())
        .args(["ask", "Quanto gastei no mes 2 de 2025 com assinaturas?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 29.90"));

    gastos(home.path())
        .args(["ask", "Quanto gastei?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 249.90"));
}

#[cfg(feature = "xlsx")]
#[test]
fn upload_xlsx_then_ask() {
    let home = tempfile::tempdir().unwrap();
    let file = write_xlsx_upload(home.path());
    gastos(home.path())
        .args(["upload", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lançamentos"));

    gastos(home.path())
        .args(["ask", "Quanto gastei no mes 2 de 2025 com assinaturas?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 29.90"));

    let output = gastos(home.path()).args(["dashboard", "--json"]).output().unwrap();
    let dash: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dash["months"], 2);
    assert_eq!(dash["by_month"][0]["mes"], 2);
}

#[test]
fn whitespace_question_is_still_answered() {
    let home = tempfile::tempdir().unwrap();
    gastos(home.path())
        .args(["ask", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carregue uma base primeiro."));

    let file = write_upload(home.path());
    gastos(home.path()).args(["upload", file.to_str().unwrap()]).assert().success();
    gastos(home.path())
        .args(["ask", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 249.90"));
}

#[test]
fn empty_question_prints_nothing() {
    let home = tempfile::tempdir().unwrap();
    gastos(home.path()).args(["ask", ""]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn load_switches_data_dir() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("outra");
    gastos(home.path())
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success();
    gastos(home.path())
        .args(["init", "--data-dir", home.path().join("primeira").to_str().unwrap()])
        .assert()
        .success();
    gastos(home.path())
        .args(["load", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to"));
    let settings = std::fs::read_to_string(home.path().join(".config/gastos/settings.json")).unwrap();
    assert!(settings.contains("outra"));
}

#[test]
fn upload_replaces_previous_data() {
    let home = tempfile::tempdir().unwrap();
    let file = write_upload(home.path());
    gastos(home.path()).args(["upload", file.to_str().unwrap()]).assert().success();

    let second = home.path().join("nova.csv");
    std::fs::write(&second, "valor,categoria,ano,mes\n10.00,Mercado,2025,1\n").unwrap();
    gastos(home.path()).args(["upload", second.to_str().unwrap()]).assert().success();

    gastos(home.path())
        .args(["ask", "total"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 10.00"));
}

#[test]
fn accented_month_header_groups_by_month() {
    let home = tempfile::tempdir().unwrap();
    let file = write_upload(home.path());
    gastos(home.path()).args(["upload", file.to_str().unwrap()]).assert().success();

    let output = gastos(home.path()).args(["dashboard", "--json"]).output().unwrap();
    assert!(output.status.success());
    let dash: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let months: Vec<(i64, i64)> = dash["by_month"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| (m["ano"].as_i64().unwrap(), m["mes"].as_i64().unwrap()))
        .collect();
    assert_eq!(months, vec![(2024, 12), (2025, 2), (2025, 3)]);
    assert_eq!(dash["entries"], 4);
    assert_eq!(dash["months"], 3);
}

#[test]
fn malformed_upload_fails_visibly() {
    let home = tempfile::tempdir().unwrap();
    let bad = home.path().join("despesas.pdf");
    std::fs::write(&bad, "%PDF").unwrap();
    gastos(home.path())
        .args(["upload", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn load_rejects_directory_without_database() {
    let home = tempfile::tempdir().unwrap();
    let empty = tempfile::tempdir().unwrap();
    gastos(home.path())
        .args(["load", empty.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database found"));
}

#[test]
fn init_then_status() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("dados");
    gastos(home.path())
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized gastos"));
    assert!(data.join("financeiro.db").exists());

    gastos(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lançamentos:  0"));
}
