//! Coloured terminal host.

use colored::Colorize;
use mf_scaffold::host::HostUi;

/// Prints host messages to the terminal. Verbose lines only appear when
/// enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHost {
    verbose: bool,
}

impl ConsoleHost {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl HostUi for ConsoleHost {
    fn info(&self, message: &str) {
        println!("  {message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow(), message);
    }

    fn verbose(&self, message: &str) {
        if self.verbose {
            println!("  {}", message.dimmed());
        }
    }
}
