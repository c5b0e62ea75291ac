use crate::error::{Error, Result};

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { pattern: String, include_archived: bool },
    Search { term: String, include_archived: bool },
    Archive { pattern: String },
    Create { name: String },
    Config,
    Autocomplete,
    Alias,
    Help,
}

/// Every flag seen on the command line, OR-ed together.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    pub help: bool,
    pub config: bool,
    pub autocomplete: bool,
    pub alias: bool,
    pub list: bool,
    pub include_archived: bool,
    pub search: Option<String>,
    pub archive: Option<String>,
}

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
}

impl ArgParser {
    pub fn new(args: Vec<String>) -> Self {
        Self { iter: args.into_iter() }
    }

    /// Split argv into flags and positional words, keeping word order.
    pub fn parse_flags(mut self) -> Result<(Flags, Vec<String>)> {
        let mut flags = Flags::default();
        let mut positional = Vec::new();

        while let Some(arg) = self.iter.next() {
            match arg.as_str() {
                "--help" => flags.help = true,
                "--config" => flags.config = true,
                "--autocomplete" => flags.autocomplete = true,
                "--alias" => flags.alias = true,
                // Unknown long flags are kept as words of the note name.
                long if long.starts_with("--") => positional.push(arg),
                chain if chain.len() > 1 && chain.starts_with('-') => {
                    self.apply_chain(&chain[1..], &mut flags)?;
                }
                _ => positional.push(arg),
            }
        }

        Ok((flags, positional))
    }

    fn apply_chain(&mut self, chain: &str, flags: &mut Flags) -> Result<()> {
        let mut chars = chain.chars().peekable();
        while let Some(c) = chars.next() {
            let last = chars.peek().is_none();
            match c {
                'h' => flags.help = true,
                'l' => flags.list = true,
                'a' => flags.include_archived = true,
                's' | 'd' => {
                    if !last {
                        return Err(Error::usage(format!(
                            "-{c} takes a value and must be the last flag in -{chain}"
                        )));
                    }
                    let value = self.extract_value(c)?;
                    if c == 's' {
                        flags.search = Some(value);
                    } else {
                        flags.archive = Some(value);
                    }
                }
                other => {
                    return Err(Error::usage(format!(
                        "unknown flag -{other} in -{chain}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The value of a value-bearing flag is the next whole token.
    fn extract_value(&mut self, flag: char) -> Result<String> {
        self.iter.next().ok_or_else(|| {
            let what = if flag == 's' { "a search term" } else { "a pattern" };
            Error::usage(format!("Provide {what} after -{flag}"))
        })
    }
}

impl Command {
    /// Pick the command for a set of flags. Positional words are joined with
    /// single spaces; for `-s`/`-d` they extend the flag value.
    pub fn from_flags(flags: Flags, positional: &[String]) -> Result<Command> {
        let joined = positional.join(" ");

        if flags.help {
            return Ok(Command::Help);
        }
        if flags.config {
            return Ok(Command::Config);
        }
        if flags.autocomplete {
            return Ok(Command::Autocomplete);
        }
        if flags.alias {
            return Ok(Command::Alias);
        }

        match (flags.search, flags.archive) {
            (Some(_), Some(_)) => {
                Err(Error::usage("-s and -d cannot be used together"))
            }
            (Some(term), None) => Ok(Command::Search {
                term: with_words(term, &joined),
                include_archived: flags.include_archived,
            }),
            (None, Some(pattern)) => {
                Ok(Command::Archive { pattern: with_words(pattern, &joined) })
            }
            (None, None) if flags.list || flags.include_archived => {
                Ok(Command::List {
                    pattern: joined,
                    include_archived: flags.include_archived,
                })
            }
            (None, None) if !joined.is_empty() => {
                Ok(Command::Create { name: joined })
            }
            (None, None) => Ok(Command::Help),
        }
    }
}

fn with_words(value: String, words: &str) -> String {
    if words.is_empty() {
        value
    } else if value.is_empty() {
        words.to_string()
    } else {
        format!("{value} {words}")
    }
}

/// Parse argv (without the program name) into a command plus the positional
/// words it was built from.
pub fn parse(args: Vec<String>) -> Result<(Command, Vec<String>)> {
    let (flags, positional) = ArgParser::new(args).parse_flags()?;
    let command = Command::from_flags(flags, &positional)?;
    Ok((command, positional))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn command(args: &[&str]) -> Command {
        parse(argv(args)).unwrap().0
    }

    #[test]
    fn no_args_is_help() {
        assert_eq!(command(&[]), Command::Help);
    }

    #[test]
    fn long_flags() {
        assert_eq!(command(&["--help"]), Command::Help);
        assert_eq!(command(&["--config"]), Command::Config);
        assert_eq!(command(&["--autocomplete"]), Command::Autocomplete);
        assert_eq!(command(&["--alias"]), Command::Alias);
    }

    #[test]
    fn unknown_long_flag_is_positional() {
        let (cmd, positional) = parse(argv(&["--weekly", "review"])).unwrap();
        assert_eq!(positional, vec!["--weekly", "review"]);
        assert_eq!(cmd, Command::Create { name: "--weekly review".into() });
    }

    #[test]
    fn bare_dash_is_positional() {
        let (_, positional) = parse(argv(&["-", "x"])).unwrap();
        assert_eq!(positional, vec!["-", "x"]);
    }

    #[test]
    fn value_flag_must_end_chain() {
        assert!(matches!(parse(argv(&["-sl", "foo"])), Err(Error::Usage(_))));
        assert!(matches!(parse(argv(&["-da", "foo"])), Err(Error::Usage(_))));
    }

    #[test]
    fn value_flag_at_end_of_chain_takes_next_token() {
        assert_eq!(
            command(&["-ls", "term"]),
            Command::Search { term: "term".into(), include_archived: false }
        );
        assert_eq!(
            command(&["-as", "-weird"]),
            Command::Search { term: "-weird".into(), include_archived: true }
        );
    }

    #[test]
    fn missing_value_is_usage_error() {
        assert!(matches!(parse(argv(&["-s"])), Err(Error::Usage(_))));
        assert!(matches!(parse(argv(&["-ad"])), Err(Error::Usage(_))));
    }

    #[test]
    fn unknown_chain_character_is_usage_error() {
        let err = parse(argv(&["-lx"])).unwrap_err();
        assert!(err.to_string().contains("-x"));
    }

    #[test]
    fn flags_or_together_regardless_of_grouping() {
        let expected =
            Command::List { pattern: String::new(), include_archived: true };
        assert_eq!(command(&["-al"]), expected);
        assert_eq!(command(&["-la"]), expected);
        assert_eq!(command(&["-a", "-l"]), expected);
        assert_eq!(command(&["-l", "-a"]), expected);
        assert_eq!(command(&["-a"]), expected);
    }

    #[test]
    fn list_pattern_from_positional_words() {
        assert_eq!(
            command(&["-l", "daily", "standup"]),
            Command::List {
                pattern: "daily standup".into(),
                include_archived: false
            }
        );
    }

    #[test]
    fn positional_words_extend_flag_values() {
        assert_eq!(
            command(&["-s", "daily", "standup"]),
            Command::Search {
                term: "daily standup".into(),
                include_archived: false
            }
        );
        assert_eq!(
            command(&["-d", "temp*"]),
            Command::Archive { pattern: "temp*".into() }
        );
    }

    #[test]
    fn search_and_archive_conflict() {
        assert!(matches!(
            parse(argv(&["-s", "a", "-d", "b"])),
            Err(Error::Usage(_))
        ));
    }

    #[test]
    fn help_wins_over_everything() {
        assert_eq!(command(&["-lh", "x"]), Command::Help);
        assert_eq!(command(&["-s", "x", "--help"]), Command::Help);
    }

    #[test]
    fn positional_words_create_a_note() {
        let (cmd, positional) = parse(argv(&["daily", "standup"])).unwrap();
        assert_eq!(cmd, Command::Create { name: "daily standup".into() });
        assert_eq!(positional, vec!["daily", "standup"]);
    }
}
