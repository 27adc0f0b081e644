use chrono::Utc;
use colored::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Gates Logger::debug output; flipped once at startup from --debug-api
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_debug_enabled(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

pub struct Logger;

impl Logger {
    // Basic log levels with proper formatting
    pub fn info(message: &str) {
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {}",
            "ℹ".blue().bold(),
            format!("[{}]", timestamp).dimmed(),
            message
        );
        let _ = io::stdout().flush();
    }

    pub fn warn(message: &str) {
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {}",
            "⚠".yellow().bold(),
            format!("[{}]", timestamp).dimmed(),
            message.yellow()
        );
        let _ = io::stdout().flush();
    }

    pub fn error(message: &str) {
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {}",
            "❌".red().bold(),
            format!("[{}]", timestamp).dimmed(),
            message.red()
        );
        let _ = io::stdout().flush();
    }

    pub fn debug(message: &str) {
        if !is_debug_enabled() {
            return;
        }
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {}",
            "🐛".purple().bold(),
            format!("[{}]", timestamp).dimmed(),
            message.dimmed()
        );
        let _ = io::stdout().flush();
    }

    pub fn success(message: &str) {
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {}",
            "✅".green().bold(),
            format!("[{}]", timestamp).dimmed(),
            message.green()
        );
        let _ = io::stdout().flush();
    }

    // Category logger for market-data activity
    pub fn market(message: &str) {
        let timestamp = Self::get_timestamp();
        println!(
            "{} {} {} {}",
            "💰".cyan().bold(),
            "MARKET".cyan().bold(),
            format!("[{}]", timestamp).dimmed(),
            message
        );
        let _ = io::stdout().flush();
    }

    pub fn header(title: &str) {
        println!();
        println!(
            "{} {} {}",
            "₿".yellow().bold(),
            "CryptoDash".green().bold(),
            format!("- {}", title).bright_white().bold()
        );
        println!("{}", "─".repeat(50).dimmed());
        let _ = io::stdout().flush();
    }

    pub fn separator() {
        println!("{}", "─".repeat(50).dimmed());
        let _ = io::stdout().flush();
    }

    fn get_timestamp() -> String {
        Utc::now().format("%H:%M:%S").to_string()
    }
}
