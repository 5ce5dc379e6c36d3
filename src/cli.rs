use std::path::PathBuf;

use crate::action::Action;

/// Process exit status for malformed command lines.
pub const EXIT_USAGE: i32 = 1;

#[derive(Debug, PartialEq, Eq)]
pub enum Cmd {
    Help,
    Get,
    SetDark,
    SetLight,
    Toggle,
    Listen(Action),
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:
{program} (help | --help | -h)
Print this message and exit.

{program} get
Print the current mode, either \"dark\" or \"light\".

{program} dark
Set theme to dark.

{program} light
Set theme to light.

{program} toggle
Toggle the theme to the opposite one.

{program} listen [--light <label> --dark <label>] <script> [<args>...]
Listen for theme changes and run the given script.
The new theme is passed as the last argument to the script: either
\"dark\" and \"light\", or the labels given with --dark and --light.

{program} base16 --root <path> --light <name> --dark <name>
Listen for theme changes and run the matching theme script,
{{root}}/scripts/base16-{{name}}.sh, from a base16-shell checkout.
"
    )
}

/// Turn argv into a command. Errors carry the message to print above the
/// usage text.
pub fn parse(args: &[String]) -> Result<Cmd, String> {
    let Some(command) = args.get(1) else {
        return Err("Provide a command.".to_string());
    };
    match command.as_str() {
        "help" | "-h" | "--help" => Ok(Cmd::Help),
        "get" => Ok(Cmd::Get),
        "dark" => Ok(Cmd::SetDark),
        "light" => Ok(Cmd::SetLight),
        "toggle" => Ok(Cmd::Toggle),
        "listen" => parse_listen(&args[2..]),
        "base16" => parse_base16(&args[2..]),
        other => Err(format!("Invalid command: {other}.")),
    }
}

/// `listen [--light <label> --dark <label>] <script> [<args>...]`. The label
/// flags are only recognized before the script token, so the script's own
/// arguments may contain them.
fn parse_listen(rest: &[String]) -> Result<Cmd, String> {
    let mut light_label = None;
    let mut dark_label = None;
    let mut consumed = 0;
    while consumed < rest.len() {
        let flag = match rest[consumed].as_str() {
            flag @ ("--light" | "--dark") => flag,
            _ => break,
        };
        let value = rest
            .get(consumed + 1)
            .ok_or_else(|| format!("Missing value for option: {flag}."))?
            .clone();
        match flag {
            "--light" => light_label = Some(value),
            _ => dark_label = Some(value),
        }
        consumed += 2;
    }

    let command = rest[consumed..].to_vec();
    if command.is_empty() {
        return Err("Provide a hook to run on theme changes.".to_string());
    }
    match (light_label, dark_label) {
        (None, None) => Ok(Cmd::Listen(Action::Script { command })),
        (Some(light_label), Some(dark_label)) => Ok(Cmd::Listen(Action::Labeled {
            command,
            light_label,
            dark_label,
        })),
        (Some(_), None) => Err("Missing required option: --dark.".to_string()),
        (None, Some(_)) => Err("Missing required option: --light.".to_string()),
    }
}

fn parse_base16(rest: &[String]) -> Result<Cmd, String> {
    let root = required_option(rest, "--root")?;
    let light_name = required_option(rest, "--light")?;
    let dark_name = required_option(rest, "--dark")?;
    Ok(Cmd::Listen(Action::Base16 {
        root: PathBuf::from(root),
        light_name,
        dark_name,
    }))
}

/// A flag must be immediately followed by its value token.
fn required_option(args: &[String], flag: &str) -> Result<String, String> {
    let position = args
        .iter()
        .position(|arg| arg == flag)
        .ok_or_else(|| format!("Missing required option: {flag}."))?;
    args.get(position + 1)
        .cloned()
        .ok_or_else(|| format!("Missing value for option: {flag}."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        std::iter::once("dark-mode")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse(&args(&["help"])), Ok(Cmd::Help));
        assert_eq!(parse(&args(&["-h"])), Ok(Cmd::Help));
        assert_eq!(parse(&args(&["--help"])), Ok(Cmd::Help));
        assert_eq!(parse(&args(&["get"])), Ok(Cmd::Get));
        assert_eq!(parse(&args(&["dark"])), Ok(Cmd::SetDark));
        assert_eq!(parse(&args(&["light"])), Ok(Cmd::SetLight));
        assert_eq!(parse(&args(&["toggle"])), Ok(Cmd::Toggle));
    }

    #[test]
    fn missing_command() {
        assert_eq!(parse(&args(&[])), Err("Provide a command.".to_string()));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse(&args(&["bogus"])),
            Err("Invalid command: bogus.".to_string())
        );
    }

    #[test]
    fn listen_plain_script() {
        assert_eq!(
            parse(&args(&["listen", "myscript", "arg1"])),
            Ok(Cmd::Listen(Action::Script {
                command: vec!["myscript".to_string(), "arg1".to_string()],
            }))
        );
    }

    #[test]
    fn listen_requires_a_script() {
        assert!(parse(&args(&["listen"])).is_err());
        assert!(parse(&args(&["listen", "--light", "ON", "--dark", "OFF"])).is_err());
    }

    #[test]
    fn listen_with_labels() {
        assert_eq!(
            parse(&args(&["listen", "--light", "ON", "--dark", "OFF", "myscript", "arg1"])),
            Ok(Cmd::Listen(Action::Labeled {
                command: vec!["myscript".to_string(), "arg1".to_string()],
                light_label: "ON".to_string(),
                dark_label: "OFF".to_string(),
            }))
        );
    }

    #[test]
    fn listen_label_flags_after_script_are_payload() {
        assert_eq!(
            parse(&args(&["listen", "myscript", "--dark", "x"])),
            Ok(Cmd::Listen(Action::Script {
                command: vec!["myscript".to_string(), "--dark".to_string(), "x".to_string()],
            }))
        );
    }

    #[test]
    fn listen_with_one_label_is_an_error() {
        assert_eq!(
            parse(&args(&["listen", "--light", "ON", "myscript"])),
            Err("Missing required option: --dark.".to_string())
        );
        assert_eq!(
            parse(&args(&["listen", "--dark", "OFF", "myscript"])),
            Err("Missing required option: --light.".to_string())
        );
    }

    #[test]
    fn listen_flag_without_value() {
        assert_eq!(
            parse(&args(&["listen", "--light"])),
            Err("Missing value for option: --light.".to_string())
        );
    }

    #[test]
    fn base16_full_form() {
        assert_eq!(
            parse(&args(&[
                "base16", "--root", "/themes", "--light", "one", "--dark", "two",
            ])),
            Ok(Cmd::Listen(Action::Base16 {
                root: PathBuf::from("/themes"),
                light_name: "one".to_string(),
                dark_name: "two".to_string(),
            }))
        );
    }

    #[test]
    fn base16_flag_order_does_not_matter() {
        assert_eq!(
            parse(&args(&[
                "base16", "--dark", "two", "--root", "/themes", "--light", "one",
            ])),
            Ok(Cmd::Listen(Action::Base16 {
                root: PathBuf::from("/themes"),
                light_name: "one".to_string(),
                dark_name: "two".to_string(),
            }))
        );
    }

    #[test]
    fn base16_missing_root() {
        assert_eq!(
            parse(&args(&["base16", "--light", "one", "--dark", "two"])),
            Err("Missing required option: --root.".to_string())
        );
    }

    #[test]
    fn base16_flag_without_value() {
        assert_eq!(
            parse(&args(&["base16", "--light", "one", "--dark", "two", "--root"])),
            Err("Missing value for option: --root.".to_string())
        );
    }

    #[test]
    fn usage_names_every_command() {
        let text = usage("dark-mode");
        for needle in ["help", "get", "dark", "light", "toggle", "listen", "base16", "--root"] {
            assert!(text.contains(needle), "usage is missing {needle}");
        }
    }
}
