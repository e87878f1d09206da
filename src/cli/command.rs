//! Command parsing and execution shared by the one-shot CLI and the REPL.

use std::io::Write;

use serde_json::Value;
use thiserror::Error;

use crate::storage::{encode, Document, Record, RecordStore, StoreError};

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Command errors.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid JSON argument: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got: {0}")]
    NotAnObject(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One store operation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Read,
    Content,
    Len,
    Append(Record),
    Write(Document),
    Delete,
    Clear,
    Contains(Record),
    Find { field: String, value: Value },
    Update { field: String, record: Record },
    UpdateTwo { field1: String, field2: String, record: Record },
    Remove { field: String, value: Value },
}

impl Command {
    /// Parse a command line such as `find id 42` or `append {"id": 1}`.
    ///
    /// The last argument of every command takes the rest of the line, so
    /// JSON and string values may contain spaces.
    pub fn parse(line: &str) -> CommandResult<Self> {
        let (name, rest) = split_word(line.trim());
        let command = match name.to_lowercase().as_str() {
            "read" => Command::Read,
            "content" | "ls" => Command::Content,
            "len" | "count" => Command::Len,
            "delete" => Command::Delete,
            "clear" => Command::Clear,
            "append" | "add" => Command::Append(parse_record(required(rest, "append JSON")?)?),
            "write" => Command::Write(parse_record(required(rest, "write JSON")?)?),
            "contains" => Command::Contains(parse_record(required(rest, "contains JSON")?)?),
            "find" | "get" => {
                let (field, value) = split_word(rest);
                Command::Find {
                    field: required(field, "find FIELD VALUE")?.to_string(),
                    value: parse_value(required(value, "find FIELD VALUE")?),
                }
            }
            "remove" | "rm" => {
                let (field, value) = split_word(rest);
                Command::Remove {
                    field: required(field, "remove FIELD VALUE")?.to_string(),
                    value: parse_value(required(value, "remove FIELD VALUE")?),
                }
            }
            "update" => {
                let (field, json) = split_word(rest);
                Command::Update {
                    field: required(field, "update FIELD JSON")?.to_string(),
                    record: parse_record(required(json, "update FIELD JSON")?)?,
                }
            }
            "update2" => {
                let (field1, rest) = split_word(rest);
                let (field2, json) = split_word(rest);
                const USAGE: &str = "update2 FIELD1 FIELD2 JSON";
                Command::UpdateTwo {
                    field1: required(field1, USAGE)?.to_string(),
                    field2: required(field2, USAGE)?.to_string(),
                    record: parse_record(required(json, USAGE)?)?,
                }
            }
            "" => return Err(CommandError::Usage("COMMAND [ARGS]")),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    /// Run the command against `store`, printing results to `out`.
    ///
    /// Returns `false` when the operation failed or found nothing.
    pub fn execute(&self, store: &RecordStore, out: &mut impl Write) -> CommandResult<bool> {
        let ok = match self {
            Command::Read => match store.read() {
                Some(doc) => {
                    print_json(out, &doc)?;
                    true
                }
                None => {
                    writeln!(out, "unreadable: {}", store.path().display())?;
                    false
                }
            },
            Command::Content => {
                print_json(out, &store.read_content())?;
                true
            }
            Command::Len => {
                writeln!(out, "{}", store.len())?;
                true
            }
            Command::Append(record) => report(out, store.append_content(record.clone()))?,
            Command::Write(doc) => report(out, store.write(doc))?,
            Command::Delete => report(out, store.delete())?,
            Command::Clear => report(out, store.clear_content())?,
            Command::Contains(record) => match store.contains_at(record) {
                Some(index) => {
                    writeln!(out, "found at {index}")?;
                    true
                }
                None => {
                    writeln!(out, "not found")?;
                    false
                }
            },
            Command::Find { field, value } => match store.find_by_uid(value, field) {
                Some(record) => {
                    print_json(out, &record)?;
                    true
                }
                None => {
                    writeln!(out, "not found")?;
                    false
                }
            },
            Command::Update { field, record } => {
                report(out, store.update(record.clone(), field))?
            }
            Command::UpdateTwo {
                field1,
                field2,
                record,
            } => report(out, store.update_by_two_uids(record.clone(), field1, field2))?,
            Command::Remove { field, value } => report(out, store.remove_by_uid(value, field))?,
        };
        Ok(ok)
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn required<'a>(arg: &'a str, usage: &'static str) -> CommandResult<&'a str> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg)
    }
}

/// Parse a JSON value, falling back to a plain string.
pub fn parse_value(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

/// Parse a JSON object argument.
pub fn parse_record(arg: &str) -> CommandResult<Record> {
    match serde_json::from_str::<Value>(arg)? {
        Value::Object(record) => Ok(record),
        _ => Err(CommandError::NotAnObject(arg.to_string())),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> CommandResult<()> {
    let bytes = encode(value)?;
    out.write_all(&bytes)?;
    writeln!(out)?;
    Ok(())
}

fn report(out: &mut impl Write, ok: bool) -> CommandResult<bool> {
    writeln!(out, "{}", if ok { "ok" } else { "failed" })?;
    Ok(ok)
}
