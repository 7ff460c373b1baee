// SPDX-License-Identifier: GPL-3.0-only

//! Softboard simulator
//!
//! Drives a keyboard session from stdin, one command per line, and prints the
//! resulting text after each command.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [config.json]
//! ```
//!
//! # Commands
//!
//! - a single character: tap that key
//! - `shift`, `sym`, `symshift`, `space`, `enter`, `del`: tap a control key
//! - `hold-del <ms>`: hold Delete for the given time, with key repeat
//! - `show`: print the display snapshot as JSON
//! - `quit`: end the session

use softboard::config::KeyboardConfig;
use softboard::layout::KeyAction;
use softboard::session::{KeyboardSession, TextBuffer};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Tap(KeyAction),
    HoldDelete(Duration),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let mut chars = line.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Letters are stored uppercase in the layout; the engine picks the case
        return Some(Command::Tap(KeyAction::Character(c.to_ascii_uppercase())));
    }

    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "shift" => Command::Tap(KeyAction::Shift),
        "sym" => Command::Tap(KeyAction::SymbolToggle),
        "symshift" => Command::Tap(KeyAction::SymbolShiftToggle),
        "space" => Command::Tap(KeyAction::Space),
        "enter" => Command::Tap(KeyAction::Enter),
        "del" => Command::Tap(KeyAction::Delete),
        "hold-del" => {
            let ms = parts.next()?.parse().ok()?;
            Command::HoldDelete(Duration::from_millis(ms))
        }
        "show" => Command::Show,
        "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Holds Delete for `duration`, feeding repeat ticks back into the session.
async fn hold_delete(session: &mut KeyboardSession<TextBuffer>, duration: Duration) {
    let deadline = tokio::time::Instant::now() + duration;
    session.press(KeyAction::Delete);
    loop {
        let next = tokio::time::timeout_at(deadline, session.next_repeat_tick()).await;
        match next {
            Ok(Some(tick)) => {
                session.on_repeat_tick(tick);
            }
            _ => break,
        }
    }
    session.release();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("softboard=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => KeyboardConfig::from_file(&path)?,
        None => KeyboardConfig::default(),
    };
    tracing::info!("Starting simulator with {:?}", config);

    let mut session = KeyboardSession::start(TextBuffer::new(), config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                tracing::warn!("Unknown command: {:?}", line.trim());
            }
            continue;
        };

        match command {
            Command::Tap(action) => {
                session.tap(action);
            }
            Command::HoldDelete(duration) => hold_delete(&mut session, duration).await,
            Command::Show => {
                println!("{}", serde_json::to_string_pretty(&session.display())?);
                continue;
            }
            Command::Quit => break,
        }
        println!("{:?}", session.sink().text());
    }

    let sink = session.finish();
    println!("{:?}", sink.text());
    Ok(())
}
