//! ANSI color helper utilities for terminal output.
use crate::ui::messages::colors_enabled;
use std::fmt::Display;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Wrap `text` in `color`, or return it plain when colours are off.
pub fn tint(text: impl Display, color: &str) -> String {
    if colors_enabled() {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Counter colour: 0 is grey, anything else uses `color`.
pub fn colorize_count(value: usize, color: &str) -> String {
    if value == 0 {
        tint(value, GREY)
    } else {
        tint(value, color)
    }
}
