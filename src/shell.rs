//! Line-oriented session. Toasts live as long as the session does, so this
//! is where deletes can be undone.

use crate::args::split_command_line;
use crate::clock::Clock;
use crate::commands::Session;
use crate::item::ItemKind;
use crate::store::Storage;
use crate::toast::ToastKind;
use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};

pub fn run<S: Storage, C: Clock>(
    session: &mut Session<S, C>,
    input: impl BufRead,
) -> Result<(), Box<dyn Error>> {
    session.interactive = true;
    let prompt = io::stdin().is_terminal();
    if prompt {
        println!("MindVault shell. Type `help` for commands, `quit` to leave.");
        print_prompt(session.view)?;
    }

    for line in input.lines() {
        let line = line?;
        for toast in session.vault.advance_toasts() {
            log::debug!("Toast {} closed after timeout", toast.id);
        }

        let words = match split_command_line(&line) {
            Ok(words) => words,
            Err(err) => {
                eprintln!("{err}");
                Vec::new()
            }
        };
        if let Some(first) = words.first().cloned() {
            match first.as_str() {
                "quit" | "exit" | "q" => break,
                "shell" => println!("Already in the shell."),
                "undo" => undo(session, &words[1..])?,
                "dismiss" => dismiss(session, &words[1..]),
                "toasts" => session.print_toasts(),
                "view" if words.len() == 2 && ItemKind::parse(&words[1]).is_some() => {
                    if let Some(kind) = ItemKind::parse(&words[1]) {
                        session.view = kind;
                        println!("Viewing {}", kind.view_name());
                    }
                }
                "view" if words.len() == 1 => println!("Viewing {}", session.view.view_name()),
                _ => {
                    if let Err(err) = session.dispatch(words) {
                        eprintln!("{err}");
                    }
                }
            }
        }

        if prompt {
            print_prompt(session.view)?;
        }
    }
    Ok(())
}

fn print_prompt(view: ItemKind) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "mindvault:{}> ", view.view_name())?;
    out.flush()
}

fn toast_arg<S: Storage, C: Clock>(
    session: &Session<S, C>,
    args: &[String],
    fallback: impl Fn(&Session<S, C>) -> Option<u64>,
) -> Result<Option<u64>, String> {
    match args.first() {
        Some(raw) => raw
            .trim_start_matches('#')
            .parse()
            .map(Some)
            .map_err(|_| format!("Toast ids are numbers, got: {raw}")),
        None => Ok(fallback(session)),
    }
}

fn undo<S: Storage, C: Clock>(
    session: &mut Session<S, C>,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    let id = match toast_arg(session, args, |s| s.vault.toasts().latest_undoable()) {
        Ok(Some(id)) => id,
        Ok(None) => {
            println!("Nothing to undo.");
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };
    match session.vault.undo(id)? {
        Some((kind, item_id)) => {
            let message = format!("Restored {} {item_id}", kind.label().to_lowercase());
            println!("{message}");
            session.vault.notify(message, ToastKind::Success);
        }
        None => println!("Nothing to undo for toast {id}."),
    }
    Ok(())
}

fn dismiss<S: Storage, C: Clock>(session: &mut Session<S, C>, args: &[String]) {
    let id = match toast_arg(session, args, |s| s.vault.toasts().iter().last().map(|t| t.id)) {
        Ok(Some(id)) => id,
        Ok(None) => {
            println!("No notifications.");
            return;
        }
        Err(msg) => {
            eprintln!("{msg}");
            return;
        }
    };
    if session.vault.dismiss(id) {
        println!("Dismissed {id}");
    } else {
        println!("No notification {id}");
    }
}
