//! Interactive picker session
//!
//! A line-oriented driver for `VariantPicker`: reads commands, applies them,
//! and writes the refreshed choices plus any resolution events.
//!
//! ```text
//! set <index> <value>   choose a value (the value may contain spaces)
//! clear <index>         unset an attribute and everything after it
//! reset                 unset everything
//! show                  print the current choices
//! help                  list commands
//! quit                  end the session
//! ```

use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use thiserror::Error;

use crate::picker::{PickerView, VariantPicker};
use crate::signal::ResolutionEvent;

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set { index: usize, value: String },
    Clear { index: usize },
    Reset,
    Show,
    Help,
    Quit,
}

/// Reasons a command line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid attribute index: {0}")]
    BadIndex(String),
}

const SET_USAGE: &str = "set <index> <value>";
const CLEAR_USAGE: &str = "clear <index>";

const HELP_TEXT: &str = "\
Commands:
  set <index> <value>   choose a value for an attribute
  clear <index>         unset an attribute and everything after it
  reset                 unset everything
  show                  print the current choices
  help                  show this help
  quit                  end the session";

fn parse_index(token: Option<&str>, usage: &'static str) -> Result<usize, CommandParseError> {
    let token = token.ok_or(CommandParseError::Usage(usage))?;
    token
        .parse()
        .map_err(|_| CommandParseError::BadIndex(token.to_string()))
}

impl FromStr for SessionCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "set" => {
                let (index, value) = match rest.split_once(char::is_whitespace) {
                    Some((index, value)) => (index, value.trim()),
                    None => return Err(CommandParseError::Usage(SET_USAGE)),
                };
                let index = parse_index(Some(index), SET_USAGE)?;
                if value.is_empty() {
                    return Err(CommandParseError::Usage(SET_USAGE));
                }
                Ok(Self::Set {
                    index,
                    value: value.to_string(),
                })
            }
            "clear" => {
                let index = parse_index((!rest.is_empty()).then_some(rest), CLEAR_USAGE)?;
                Ok(Self::Clear { index })
            }
            "reset" => Ok(Self::Reset),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

/// Write the picker view as plain text
pub fn write_view<W: Write>(out: &mut W, view: &PickerView) -> std::io::Result<()> {
    for (index, attribute) in view.attributes.iter().enumerate() {
        let selected = attribute.selected.as_deref().unwrap_or("-");
        if attribute.enabled {
            writeln!(
                out,
                "[{}] {}: {}  (options: {})",
                index,
                attribute.name,
                selected,
                attribute.options.join(", ")
            )?;
        } else {
            writeln!(out, "[{}] {}: {}  (disabled)", index, attribute.name, selected)?;
        }
    }
    writeln!(out, "Status: {}", view.status_text())
}

fn write_event<W: Write>(out: &mut W, event: &ResolutionEvent) -> std::io::Result<()> {
    match event {
        ResolutionEvent::Resolved { id, options } => {
            writeln!(out, "=> resolved variant {} ({})", id, options.join(" / "))
        }
        ResolutionEvent::Unresolved => writeln!(out, "=> unresolved"),
    }
}

/// Run commands from `input` until it ends or `quit` is read.
///
/// Parse and selection errors are reported on `out` and the session goes on.
/// The session's listener is removed from the picker when it returns.
pub fn run_session<R, W>(picker: &mut VariantPicker, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let (tx, rx) = mpsc::channel();
    let listener = picker.subscribe(tx);

    let result = drive_session(picker, &rx, input, out);
    picker.unsubscribe(listener);
    result
}

fn drive_session<R, W>(
    picker: &mut VariantPicker,
    events: &Receiver<ResolutionEvent>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for event in events.try_iter() {
        write_event(out, &event)?;
    }
    write_view(out, &picker.view())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        tracing::debug!(?command, "Session command");

        let outcome = match command {
            SessionCommand::Set { index, value } => picker.choose(index, &value).map(|_| ()),
            SessionCommand::Clear { index } => picker.clear(index).map(|_| ()),
            SessionCommand::Reset => {
                picker.reset();
                Ok(())
            }
            SessionCommand::Show => Ok(()),
            SessionCommand::Help => {
                writeln!(out, "{}", HELP_TEXT)?;
                continue;
            }
            SessionCommand::Quit => break,
        };

        if let Err(e) = outcome {
            writeln!(out, "error: {}", e)?;
            continue;
        }

        for event in events.try_iter() {
            write_event(out, &event)?;
        }
        write_view(out, &picker.view())?;
    }

    out.flush()?;
    Ok(())
}
