//! Console output helpers.
//!
//! Thin wrappers over `colored` so every screen uses the same palette:
//! green for success, red for errors, yellow for warnings, cyan for
//! headers.

use colored::Colorize;

/// Prints a boxed section header.
pub fn header(title: &str) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.cyan());
    println!("{}", format!("  {title}").cyan().bold());
    println!("{}", rule.cyan());
}

/// Prints a success line.
pub fn success(message: &str) {
    println!("{} {}", "✔".green().bold(), message.green());
}

/// Prints an error line.
pub fn error(message: &str) {
    println!("{} {}", "✘".red().bold(), message.red());
}

/// Prints a warning line.
pub fn warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

/// Prints a neutral info line.
pub fn info(message: &str) {
    println!("  {message}");
}

/// Renders a severity tag in its color.
pub fn severity_tag(label: &str) -> String {
    match label {
        "CRITICAL" => label.red().bold().to_string(),
        "WARNING" => label.yellow().to_string(),
        _ => label.normal().to_string(),
    }
}
