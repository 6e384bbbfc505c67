// src/core/sanitize.rs
use serde_json::Value;

/// Canonical join-key form. Codes arrive as JSON strings from one service and
/// as numbers (sometimes `3110008.0` after a spreadsheet round trip) from another;
/// both must compare equal as text. Leading zeros are kept.
pub fn normalize_code(raw: &str) -> String {
    let s = raw.trim();
    if let Some((int, frac)) = s.split_once('.') {
        let int_ok = !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit());
        let frac_zero = !frac.is_empty() && frac.bytes().all(|b| b == b'0');
        if int_ok && frac_zero {
            return s!(int);
        }
    }
    s!(s)
}

/// Flatten one upstream JSON value into a table cell.
/// Whole floats print without the fraction so counts stay integers.
pub fn json_cell(v: &Value) -> String {
    match v {
        Value::Null => s!(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Store counts: non-negative integers, tolerating a zero fraction.
/// An empty cell counts as zero.
pub fn parse_count(raw: &str) -> Option<u64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0);
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let f: f64 = s.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 { Some(f as u64) } else { None }
}

/// Empty or whitespace-only labels become `fallback`.
pub fn label_or(raw: &str, fallback: &str) -> String {
    let t = raw.trim();
    if t.is_empty() { s!(fallback) } else { s!(t) }
}
