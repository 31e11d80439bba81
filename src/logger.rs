//! Logging utilities with colored output.
//!
//! Provides the `log!` macro for formatted terminal output with colored
//! `[module]` prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "generating {} entries", count);
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}
