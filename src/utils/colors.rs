/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for zero amounts, reset otherwise.
pub fn color_for_amount(value: f64) -> &'static str {
    if value == 0.0 { GREY } else { RESET }
}

/// Fill rows stand out in yellow, usage rows in green.
pub fn color_for_status(is_fill: bool) -> &'static str {
    if is_fill { YELLOW } else { GREEN }
}
