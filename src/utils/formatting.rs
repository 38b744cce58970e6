//! Formatting utilities used for CLI and import outputs.

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Volume with one decimal and the liter suffix, e.g. `120.0L`.
pub fn fmt_liters(v: f64) -> String {
    format!("{:.1}L", v)
}

/// Compact number for notes and tables: integers without decimals,
/// everything else with at most two.
pub fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
