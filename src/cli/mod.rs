//! Command-line front end: one-shot commands and an interactive REPL.

mod command;
mod repl;

use std::path::PathBuf;

pub use command::{parse_record, parse_value, Command, CommandError, CommandResult};
pub use repl::{Repl, ReplConfig};

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Help,
    Version,
    /// Run one command, or the REPL when `command` is `None`.
    Run {
        path: PathBuf,
        verbose: bool,
        command: Option<Command>,
    },
}

/// Parse command line arguments (without the program name).
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> CommandResult<CliAction> {
    let mut verbose = false;
    let mut path: Option<PathBuf> = None;
    let mut rest: Vec<&str> = Vec::new();

    for arg in args.iter().map(|a| a.as_ref()) {
        // Flags are only recognised before the command word.
        if rest.is_empty() {
            match arg {
                "-h" | "--help" => return Ok(CliAction::Help),
                "--version" => return Ok(CliAction::Version),
                "-v" | "--verbose" => {
                    verbose = true;
                    continue;
                }
                _ if path.is_none() => {
                    if arg.starts_with('-') {
                        return Err(CommandError::Unknown(arg.to_string()));
                    }
                    path = Some(PathBuf::from(arg));
                    continue;
                }
                _ => {}
            }
        }
        rest.push(arg);
    }

    let path = path.ok_or(CommandError::Usage("tsjson [OPTIONS] FILE [COMMAND [ARGS]]"))?;
    let command = if rest.is_empty() {
        None
    } else {
        Some(Command::parse(&rest.join(" "))?)
    };

    Ok(CliAction::Run {
        path,
        verbose,
        command,
    })
}

/// Usage text for `--help`.
pub fn help_text() -> String {
    [
        "tsjson - thread-safe JSON record store",
        "",
        "Usage: tsjson [OPTIONS] FILE [COMMAND [ARGS]]",
        "",
        "Without COMMAND an interactive session is started.",
        "",
        "Options:",
        "  -v, --verbose          Log every store operation",
        "  -h, --help             Show this help message",
        "  --version              Show version",
        "",
        "Commands:",
        "  read | content | len | delete | clear",
        "  append JSON | write JSON | contains JSON",
        "  find FIELD VALUE | remove FIELD VALUE",
        "  update FIELD JSON | update2 FIELD1 FIELD2 JSON",
        "",
        "Examples:",
        "  tsjson users.json append '{\"id\": 1, \"name\": \"Alice\"}'",
        "  tsjson users.json find id 1",
    ]
    .join("\n")
}
