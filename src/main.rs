//! tsjson - thread-safe JSON record store
//!
//! This is the main entry point for the tsjson command-line interface.

use std::process::ExitCode;

use tsjson::cli::{help_text, parse_args, CliAction, Repl};
use tsjson::storage::{RecordStore, StoreConfig};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let action = match parse_args(args.as_slice()) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try `tsjson --help`.");
            return ExitCode::FAILURE;
        }
    };

    let (path, verbose, command) = match action {
        CliAction::Help => {
            println!("{}", help_text());
            return ExitCode::SUCCESS;
        }
        CliAction::Version => {
            println!("tsjson v{}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        CliAction::Run {
            path,
            verbose,
            command,
        } => (path, verbose, command),
    };

    init_tracing(verbose);

    let store = RecordStore::with_config(StoreConfig::new(path).verbose(verbose));

    // Execute single command or run REPL.
    let result = match command {
        Some(command) => command.execute(&store, &mut std::io::stdout().lock()),
        None => Repl::new(store).run().map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
