//! Interactive input helpers.
//!
//! Every prompt re-asks on bad input instead of failing the menu action;
//! parsing itself is split out into pure functions so it can be tested.

use std::io::{self, Write};

use chrono::NaiveDate;

use depot_core::validation::parse_date;
use depot_core::Money;

use crate::console;

fn read_line(label: &str) -> String {
    print!("{label}: ");
    let _ = io::stdout().flush();
    let mut buffer = String::new();
    // EOF or a broken pipe reads as empty input; the caller re-prompts
    // or treats it as "skip".
    let _ = io::stdin().read_line(&mut buffer);
    buffer.trim().to_string()
}

/// Prompts until a non-empty line is entered.
pub fn prompt_nonempty(label: &str) -> String {
    loop {
        let value = read_line(label);
        if !value.is_empty() {
            return value;
        }
        console::warning("A value is required.");
    }
}

/// Prompts once; an empty line means "skip".
pub fn prompt_optional(label: &str) -> Option<String> {
    let value = read_line(label);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Prompts until a whole number is entered.
pub fn prompt_i64(label: &str) -> i64 {
    loop {
        match read_line(label).parse() {
            Ok(value) => return value,
            Err(_) => console::warning("Enter a whole number."),
        }
    }
}

/// Prompts until a decimal number is entered.
pub fn prompt_f64(label: &str) -> f64 {
    loop {
        match read_line(label).parse() {
            Ok(value) => return value,
            Err(_) => console::warning("Enter a number."),
        }
    }
}

/// Prompts until a price like `12`, `12.5`, or `12.50` is entered.
pub fn prompt_money(label: &str) -> Money {
    loop {
        match parse_money(&read_line(label)) {
            Ok(value) => return value,
            Err(reason) => console::warning(&reason),
        }
    }
}

/// Prompts until a `YYYY-MM-DD` date is entered.
pub fn prompt_date(label: &str) -> NaiveDate {
    loop {
        match parse_date(&read_line(label)) {
            Ok(date) => return date,
            Err(e) => console::warning(&e.to_string()),
        }
    }
}

/// Prompts for a yes/no answer; empty input takes the default.
pub fn prompt_bool(label: &str, default: bool) -> bool {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let value = read_line(&format!("{label} [{hint}]")).to_lowercase();
        match value.as_str() {
            "" => return default,
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => console::warning("Answer y or n."),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a non-negative decimal amount into [`Money`].
///
/// Accepts an optional leading `$` and at most two decimal places.
pub fn parse_money(input: &str) -> Result<Money, String> {
    let trimmed = input.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return Err("Enter an amount like 12.50".to_string());
    }

    let (major_str, minor) = match trimmed.split_once('.') {
        Some((major, minor_str)) => {
            if minor_str.is_empty()
                || minor_str.len() > 2
                || !minor_str.chars().all(|c| c.is_ascii_digit())
            {
                return Err("Use at most two decimal places, like 12.50".to_string());
            }
            let mut minor: i64 = minor_str.parse().map_err(|_| "Invalid amount".to_string())?;
            if minor_str.len() == 1 {
                minor *= 10; // "12.5" means 12.50
            }
            (major, minor)
        }
        None => (trimmed, 0),
    };

    let major: i64 = major_str
        .parse()
        .map_err(|_| "Enter an amount like 12.50".to_string())?;
    if major < 0 {
        return Err("Amount cannot be negative".to_string());
    }

    Ok(Money::from_major_minor(major, minor))
}

// =============================================================================
// Unit Tests
// =============================================================================
