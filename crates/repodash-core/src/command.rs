use std::process::Command;
use tracing::warn;

/// Executes one external command and returns whatever it printed to stdout.
///
/// The trait seam keeps the dispatcher testable without real subprocesses.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> String;
}

/// Runs commands via `std::process`.
///
/// Only 2- or 3-element argument lists are executed (command name plus one or
/// two parameters); any other arity is a no-op returning empty output, so
/// callers must only ever construct those shapes. Exit codes are not
/// inspected, and a failed spawn degrades to empty output after a log line;
/// the action is retried on the next cycle anyway.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> String {
        let [program, args @ ..] = argv else {
            return String::new();
        };
        if args.is_empty() || args.len() > 2 {
            return String::new();
        }
        match Command::new(program).args(args).output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).into_owned(),
            Err(err) => {
                warn!(command = %program, error = %err, "command failed to start");
                String::new()
            }
        }
    }
}
