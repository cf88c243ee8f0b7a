use colored::Colorize;
use serde_json::Value;
use std::io::{self, Write};

/// Response bodies go to stdout exactly as the service sent them.
pub fn print_body(body: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(body)?;
    out.write_all(b"\n")?;
    out.flush()
}

pub fn print_url(url: &str) {
    println!("{url}");
}

pub fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "OK".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "ERROR".red().bold(), msg);
}

/// Error bodies from the service are written to stderr byte for byte.
pub fn print_error_body(body: &[u8]) {
    let mut err = io::stderr().lock();
    let _ = write!(err, "{} ", "ERROR".red().bold());
    let _ = err.write_all(body);
    let _ = err.write_all(b"\n");
}

/// Keep the first and last few characters of a secret for display.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "*".repeat(chars.len())
    }
}
