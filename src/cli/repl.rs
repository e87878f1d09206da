//! Interactive REPL (Read-Eval-Print Loop) over one store file.

use std::io::{self, BufRead, Write};

use super::command::{Command, CommandResult};
use crate::storage::RecordStore;

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string.
    pub prompt: String,
    /// Show timing information.
    pub timing: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "tsjson> ".into(),
            timing: false,
        }
    }
}

/// The interactive REPL.
pub struct Repl {
    store: RecordStore,
    config: ReplConfig,
    history: Vec<String>,
}

impl Repl {
    /// Create a new REPL over the given store.
    pub fn new(store: RecordStore) -> Self {
        Self::with_config(store, ReplConfig::default())
    }

    /// Create a REPL with custom configuration.
    pub fn with_config(store: RecordStore, config: ReplConfig) -> Self {
        Self {
            store,
            config,
            history: Vec::new(),
        }
    }

    /// Run the REPL on stdin/stdout.
    pub fn run(&mut self) -> CommandResult<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Run the REPL over arbitrary input and output.
    pub fn run_with(&mut self, mut input: impl BufRead, out: &mut impl Write) -> CommandResult<()> {
        writeln!(out, "tsjson v{} on {}", env!("CARGO_PKG_VERSION"), self.store.path().display())?;
        writeln!(out, "Type .help for commands.")?;

        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.history.push(line.to_string());

            if let Some(meta) = line.strip_prefix('.') {
                if self.handle_meta(meta, out)? {
                    break;
                }
                continue;
            }

            let start = std::time::Instant::now();
            match Command::parse(line).and_then(|cmd| cmd.execute(&self.store, out)) {
                Ok(_) => {
                    if self.config.timing {
                        writeln!(out, "Time: {:.3}ms", start.elapsed().as_secs_f64() * 1000.0)?;
                    }
                }
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }

        Ok(())
    }

    /// Handle a `.command`. Returns true when the REPL should exit.
    fn handle_meta(&mut self, cmd: &str, out: &mut impl Write) -> CommandResult<bool> {
        match cmd.trim().to_lowercase().as_str() {
            "help" | "h" | "?" => self.print_help(out)?,
            "quit" | "exit" | "q" => return Ok(true),
            "history" => {
                for (i, entry) in self.history.iter().enumerate() {
                    writeln!(out, "{:4}  {}", i + 1, entry)?;
                }
            }
            "timing" => {
                self.config.timing = !self.config.timing;
                writeln!(out, "Timing: {}", if self.config.timing { "on" } else { "off" })?;
            }
            other => {
                writeln!(out, "Unknown command: .{}", other)?;
                writeln!(out, "Type .help for available commands")?;
            }
        }
        Ok(false)
    }

    fn print_help(&self, out: &mut impl Write) -> CommandResult<()> {
        writeln!(out, "Commands:")?;
        writeln!(out, "  .help, .h, .?              Show this help message")?;
        writeln!(out, "  .quit, .exit, .q           Exit the REPL")?;
        writeln!(out, "  .history                   Show command history")?;
        writeln!(out, "  .timing                    Toggle timing display")?;
        writeln!(out)?;
        writeln!(out, "Store operations:")?;
        writeln!(out, "  read                       Print the whole document")?;
        writeln!(out, "  content | len              Print the records / their count")?;
        writeln!(out, "  append JSON                Append a record")?;
        writeln!(out, "  write JSON                 Overwrite the whole document")?;
        writeln!(out, "  contains JSON              Position of an equal record")?;
        writeln!(out, "  find FIELD VALUE           First record with FIELD == VALUE")?;
        writeln!(out, "  update FIELD JSON          Replace the record matching on FIELD")?;
        writeln!(out, "  update2 F1 F2 JSON         Replace the record matching on F1 and F2")?;
        writeln!(out, "  remove FIELD VALUE         Remove the first matching record")?;
        writeln!(out, "  clear | delete             Reset the content / remove the file")?;
        writeln!(out)?;
        Ok(())
    }
}
