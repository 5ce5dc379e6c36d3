use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::theme::Theme;

/// What a listener runs on startup and on each appearance change. Chosen
/// once from the command line and fixed for the lifetime of the listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Run a user command with the literal theme name ("dark" or "light")
    /// appended as the last argument.
    Script { command: Vec<String> },
    /// Run a user command with a user-chosen label appended instead of the
    /// literal theme name.
    Labeled {
        command: Vec<String>,
        light_label: String,
        dark_label: String,
    },
    /// Run the base16 shell script matching the current theme from a themes
    /// checkout; nothing is appended to it.
    Base16 {
        root: PathBuf,
        light_name: String,
        dark_name: String,
    },
}

impl Action {
    /// Build the full command line to run for the given theme.
    pub fn command_for(&self, theme: Theme) -> Vec<String> {
        match self {
            Action::Script { command } => {
                let mut full = command.clone();
                full.push(theme.to_string());
                full
            }
            Action::Labeled {
                command,
                light_label,
                dark_label,
            } => {
                let label = match theme {
                    Theme::Dark => dark_label,
                    Theme::Light => light_label,
                };
                let mut full = command.clone();
                full.push(label.clone());
                full
            }
            Action::Base16 {
                root,
                light_name,
                dark_name,
            } => {
                let name = match theme {
                    Theme::Dark => dark_name,
                    Theme::Light => light_name,
                };
                let script = root.join("scripts").join(format!("base16-{name}.sh"));
                vec!["bash".to_string(), script.to_string_lossy().into_owned()]
            }
        }
    }

    /// Whether a failed invocation takes the listener down with it. base16
    /// scripts are fire-and-forget; user scripts are not.
    pub fn fatal_on_failure(&self) -> bool {
        !matches!(self, Action::Base16 { .. })
    }
}

/// Run an external command with the current environment, stdout and stderr
/// passed through, blocking until it exits.
pub fn run_command(command: &[String]) -> io::Result<ExitStatus> {
    let Some((program, args)) = command.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };
    debug!(command = %command.join(" "), "running action");
    Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
}
