use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::action::{self, Action};
use crate::appearance::AppearanceSource;
use crate::theme::Theme;

/// Process exit status when a user script fails.
pub const ACTION_FAILURE: i32 = 2;

/// Run the action for the current theme once, then once per appearance
/// change notification, forever under normal operation. Notifications queue
/// while an invocation is in flight and are handled one at a time, in
/// arrival order.
pub fn listen<S>(source: S, action: Action) -> Result<()>
where
    S: AppearanceSource + Copy + Send + 'static,
{
    invoke(&action, source.current())?;

    let (events, queued) = mpsc::channel();
    let consumer_action = action.clone();
    thread::spawn(move || {
        if let Err(err) = drain_events(&queued, source, &consumer_action) {
            eprintln!("{err}");
            std::process::exit(ACTION_FAILURE);
        }
    });

    source.watch(events)
}

/// Handle queued notifications until the watcher goes away. Each event is a
/// fresh theme read followed by one action invocation.
fn drain_events<S: AppearanceSource>(
    queued: &Receiver<()>,
    source: S,
    action: &Action,
) -> Result<()> {
    for () in queued.iter() {
        invoke(action, source.current())?;
    }
    Ok(())
}

fn invoke(action: &Action, theme: Theme) -> Result<()> {
    let command = action.command_for(theme);
    let failed = match action::run_command(&command) {
        Ok(status) => !status.success(),
        Err(_) => true,
    };
    if failed {
        if action.fatal_on_failure() {
            return Err(anyhow!("Error running script: {}", command.join(" ")));
        }
        debug!(command = %command.join(" "), "ignoring failed theme script");
    }
    Ok(())
}
