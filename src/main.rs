// Modules
mod action;
mod appearance;
mod cli;
mod listener;
mod theme;

use std::env;
use std::process::exit;

use tracing_subscriber::EnvFilter;

use crate::appearance::AppearanceSource;
use crate::cli::Cmd;
use crate::theme::Theme;

fn main() {
    // Diagnostics go to stderr so `get` output stays machine readable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("dark-mode");
    let command = match cli::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{}", cli::usage(program));
            exit(cli::EXIT_USAGE);
        }
    };

    let source = appearance::create_source();
    match command {
        Cmd::Help => print!("{}", cli::usage(program)),
        Cmd::Get => println!("{}", source.current()),
        Cmd::SetDark => appearance::set(Theme::Dark),
        Cmd::SetLight => appearance::set(Theme::Light),
        Cmd::Toggle => appearance::toggle(),
        Cmd::Listen(action) => {
            if let Err(err) = listener::listen(source, action) {
                eprintln!("{err}");
                exit(listener::ACTION_FAILURE);
            }
        }
    }
}
