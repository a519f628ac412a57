//! Command-line argument parsing.
//!
//! Global flags (`--debug`, `--config <dir>`, `--timestamps`, `--now <instant>`)
//! may appear anywhere; the first non-flag word selects the subcommand.

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub timestamps: bool,
    /// Freeze the clock at this RFC 3339 instant.
    pub now: Option<String>,
}

/// What the binary should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print the number of days in a zero-based month.
    Days { year: i32, month: i32 },
    /// List time slots.
    Slots { interval: Option<u32> },
    /// Render a committed value the way the trigger control shows it.
    Format { value: String, with_time: bool },
    /// Feed a scripted event sequence through a picker.
    Replay {
        script: String,
        json: bool,
        log_file: Option<String>,
    },
    /// Interactive terminal picker.
    Pick {
        with_time: Option<bool>,
        value: String,
    },
    /// Print the effective configuration.
    ShowConfig,
    ShowHelp { topic: Option<String> },
    ShowVersion,
    /// Unknown or malformed arguments.
    ShowHelpDueToError { message: String },
}

pub struct ParsedArgs {
    pub options: GlobalOptions,
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = GlobalOptions::default();
        let mut words: Vec<String> = Vec::new();
        let mut flags: Vec<String> = Vec::new();
        let mut log_file: Option<String> = None;

        let mut iter = args.into_iter().map(|s| s.as_ref().to_string());
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" | "-d" => options.debug_enabled = true,
                "--timestamps" => options.timestamps = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => options.config_dir = Some(dir),
                    None => return Self::error(options, "--config requires a directory"),
                },
                "--log" => match iter.next() {
                    Some(file) => log_file = Some(file),
                    None => return Self::error(options, "--log requires a file path"),
                },
                "--now" => match iter.next() {
                    Some(instant) => options.now = Some(instant),
                    None => return Self::error(options, "--now requires an RFC 3339 instant"),
                },
                "--help" | "-h" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp {
                            topic: words.first().cloned(),
                        },
                        options,
                    };
                }
                "--version" | "-V" => {
                    return ParsedArgs {
                        options,
                        action: CliAction::ShowVersion,
                    };
                }
                _ if arg.starts_with('-') && arg.len() > 1 && !is_negative_number(&arg) => {
                    flags.push(arg)
                }
                _ => words.push(arg),
            }
        }

        let action = match Self::parse_command(&words, &mut flags, log_file) {
            Ok(action) => action,
            Err(message) => return Self::error(options, &message),
        };

        if let Some(flag) = flags.first() {
            return Self::error(options, &format!("Unknown option: {flag}"));
        }

        ParsedArgs { options, action }
    }

    fn parse_command(
        words: &[String],
        flags: &mut Vec<String>,
        log_file: Option<String>,
    ) -> Result<CliAction, String> {
        let Some((command, rest)) = words.split_first() else {
            return Ok(CliAction::ShowHelp { topic: None });
        };

        if log_file.is_some() && command != "replay" {
            return Err("--log is only supported by replay".to_string());
        }

        match command.as_str() {
            "days" => {
                let [year, month] = rest else {
                    return Err("Usage: datedrop days <year> <month>".to_string());
                };
                Ok(CliAction::Days {
                    year: parse_number(year, "year")?,
                    month: parse_number(month, "month")?,
                })
            }
            "slots" => match rest {
                [] => Ok(CliAction::Slots { interval: None }),
                [interval] => Ok(CliAction::Slots {
                    interval: Some(parse_number(interval, "interval")?),
                }),
                _ => Err("Usage: datedrop slots [interval]".to_string()),
            },
            "format" => {
                let with_time = take_flag(flags, &["--time", "-t"]);
                let [value] = rest else {
                    return Err("Usage: datedrop format <value> [--time]".to_string());
                };
                Ok(CliAction::Format {
                    value: value.clone(),
                    with_time,
                })
            }
            "replay" => {
                let json = take_flag(flags, &["--json"]);
                let [script] = rest else {
                    return Err("Usage: datedrop replay <script> [--json] [--log <file>]".to_string());
                };
                Ok(CliAction::Replay {
                    script: script.clone(),
                    json,
                    log_file,
                })
            }
            "pick" => {
                let with_time = if take_flag(flags, &["--time", "-t"]) {
                    Some(true)
                } else if take_flag(flags, &["--date"]) {
                    Some(false)
                } else {
                    None
                };
                match rest {
                    [] => Ok(CliAction::Pick {
                        with_time,
                        value: String::new(),
                    }),
                    [value] => Ok(CliAction::Pick {
                        with_time,
                        value: value.clone(),
                    }),
                    _ => Err("Usage: datedrop pick [value] [--time | --date]".to_string()),
                }
            }
            "config" => Ok(CliAction::ShowConfig),
            "help" => Ok(CliAction::ShowHelp {
                topic: rest.first().cloned(),
            }),
            other => Err(format!("Unknown command: {other}")),
        }
    }

    fn error(options: GlobalOptions, message: &str) -> ParsedArgs {
        ParsedArgs {
            options,
            action: CliAction::ShowHelpDueToError {
                message: message.to_string(),
            },
        }
    }
}

fn is_negative_number(arg: &str) -> bool {
    arg[1..].chars().all(|c| c.is_ascii_digit())
}

fn parse_number<T: std::str::FromStr>(word: &str, name: &str) -> Result<T, String> {
    word.parse::<T>()
        .map_err(|_| format!("Invalid {name}: {word}"))
}

/// Remove any of `names` from `flags`, reporting whether one was present.
fn take_flag(flags: &mut Vec<String>, names: &[&str]) -> bool {
    let before = flags.len();
    flags.retain(|flag| !names.contains(&flag.as_str()));
    flags.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedArgs {
        ParsedArgs::parse(args.iter().copied())
    }

    #[test]
    fn test_no_arguments_shows_help() {
        assert_eq!(parse(&[]).action, CliAction::ShowHelp { topic: None });
    }

    #[test]
    fn test_days_command() {
        assert_eq!(
            parse(&["days", "2024", "1"]).action,
            CliAction::Days {
                year: 2024,
                month: 1
            }
        );
        assert!(matches!(
            parse(&["days", "2024"]).action,
            CliAction::ShowHelpDueToError { .. }
        ));
        assert!(matches!(
            parse(&["days", "soon", "1"]).action,
            CliAction::ShowHelpDueToError { .. }
        ));
    }

    #[test]
    fn test_negative_month_is_a_value() {
        assert_eq!(
            parse(&["days", "2024", "-1"]).action,
            CliAction::Days {
                year: 2024,
                month: -1
            }
        );
    }

    #[test]
    fn test_slots_command() {
        assert_eq!(parse(&["slots"]).action, CliAction::Slots { interval: None });
        assert_eq!(
            parse(&["slots", "15"]).action,
            CliAction::Slots { interval: Some(15) }
        );
    }

    #[test]
    fn test_format_command_with_time_flag() {
        assert_eq!(
            parse(&["format", "--time", "2024-03-05T14:30:00Z"]).action,
            CliAction::Format {
                value: "2024-03-05T14:30:00Z".to_string(),
                with_time: true
            }
        );
    }

    #[test]
    fn test_replay_command() {
        assert_eq!(
            parse(&["replay", "steps.txt", "--json"]).action,
            CliAction::Replay {
                script: "steps.txt".to_string(),
                json: true,
                log_file: None
            }
        );
        assert_eq!(
            parse(&["replay", "--log", "out.log", "steps.txt"]).action,
            CliAction::Replay {
                script: "steps.txt".to_string(),
                json: false,
                log_file: Some("out.log".to_string())
            }
        );
    }

    #[test]
    fn test_pick_command() {
        assert_eq!(
            parse(&["pick", "--time"]).action,
            CliAction::Pick {
                with_time: Some(true),
                value: String::new()
            }
        );
        assert_eq!(
            parse(&["pick", "2024-03-05"]).action,
            CliAction::Pick {
                with_time: None,
                value: "2024-03-05".to_string()
            }
        );
    }

    #[test]
    fn test_global_options_anywhere() {
        let parsed = parse(&["--debug", "slots", "--config", "/tmp/dd", "--now", "2024-01-01T00:00:00Z"]);
        assert!(parsed.options.debug_enabled);
        assert_eq!(parsed.options.config_dir.as_deref(), Some("/tmp/dd"));
        assert_eq!(parsed.options.now.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(parsed.action, CliAction::Slots { interval: None });
    }

    #[test]
    fn test_unknown_command_and_option() {
        assert!(matches!(
            parse(&["frobnicate"]).action,
            CliAction::ShowHelpDueToError { .. }
        ));
        match parse(&["slots", "--bogus"]).action {
            CliAction::ShowHelpDueToError { message } => assert!(message.contains("--bogus")),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(
            parse(&["help", "replay"]).action,
            CliAction::ShowHelp {
                topic: Some("replay".to_string())
            }
        );
        assert_eq!(
            parse(&["replay", "--help"]).action,
            CliAction::ShowHelp {
                topic: Some("replay".to_string())
            }
        );
        assert_eq!(parse(&["--version"]).action, CliAction::ShowVersion);
    }

    #[test]
    fn test_log_only_for_replay() {
        assert!(matches!(
            parse(&["slots", "--log", "out.log"]).action,
            CliAction::ShowHelpDueToError { .. }
        ));
    }

    #[test]
    fn test_missing_config_value() {
        assert!(matches!(
            parse(&["--config"]).action,
            CliAction::ShowHelpDueToError { .. }
        ));
    }
}
