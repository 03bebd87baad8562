pub mod args;
pub mod clock;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod formatting;
mod help;
pub mod item;
pub mod metadata;
pub mod render;
pub mod repository;
pub mod search;
pub mod shell;
pub mod store;
pub mod tags;
pub mod toast;
pub mod vault;

pub mod shared {
    pub mod migrate;
    pub mod table;
}

use crate::clock::SystemClock;
use crate::commands::Session;
use crate::config::Config;
use crate::metadata::GeminiClient;
use crate::store::{FileStorage, ensure_dir};
use crate::vault::Vault;
use std::env;
use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};

pub fn entry() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();

    let config = Config::from_env()?;
    ensure_dir(&config.vault_dir)?;
    log::debug!("Vault directory: {}", config.vault_dir.display());

    let storage = FileStorage::new(&config.vault_dir);
    let vault = Vault::open(storage, SystemClock, config.toast_duration, config.restore_policy);
    let fetcher = Box::new(GeminiClient::from_config(&config));
    let mut session = Session::new(vault, config, fetcher);

    match args.first().map(String::as_str) {
        Some("shell") => shell::run(&mut session, io::stdin().lock()),
        _ => session.dispatch(args),
    }
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}

pub(crate) fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
}

fn terminal_rows() -> Option<usize> {
    terminal_size::terminal_size().map(|(_, terminal_size::Height(h))| usize::from(h))
}

/// Print lines, going through `$PAGER` (default `less -R`) when stdout is a
/// terminal and the output would not fit on one screen.
pub(crate) fn paginate_and_print(lines: &[String]) -> io::Result<()> {
    let fits = terminal_rows().is_none_or(|rows| lines.len() < rows.saturating_sub(1));
    if fits || !io::stdout().is_terminal() {
        return print_lines(lines);
    }

    let pager = env::var("PAGER").unwrap_or_else(|_| "less -R".to_string());
    let mut parts = pager.split_whitespace();
    let Some(program) = parts.next() else {
        return print_lines(lines);
    };
    let child = Command::new(program).args(parts).stdin(Stdio::piped()).spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            log::debug!("Pager {program} unavailable: {e}");
            return print_lines(lines);
        }
    };
    if let Some(mut stdin) = child.stdin.take() {
        for line in lines {
            if writeln!(stdin, "{line}").is_err() {
                break;
            }
        }
    }
    child.wait()?;
    Ok(())
}

fn print_lines(lines: &[String]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
