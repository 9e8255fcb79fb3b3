/// Format a float as reais with thousands separators: R$ 1,234.56
pub fn money(val: f64) -> String {
    let cents = format!("{:.2}", val.abs());
    let negative = val < 0.0 && cents != "0.00";
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-R$ {with_commas}.{dec_part}")
    } else {
        format!("R$ {with_commas}.{dec_part}")
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// "2025-02", or "?" for the parts that were blank in the upload.
pub fn month_label(ano: Option<i64>, mes: Option<i64>) -> String {
    let ano = ano.map_or("?".to_string(), |a| a.to_string());
    let mes = mes.map_or("?".to_string(), |m| format!("{m:02}"));
    format!("{ano}-{mes}")
}
