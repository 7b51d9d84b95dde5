//! Command-line token classification.
//!
//! Every argument is either an option (`-x`, `-x=value`, `--name`, `--name=value`) or a
//! positional. Grouped short options and space-separated values are not supported.

/// Which prefix introduced an option token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Short,
    Long,
}

/// A classified command-line token borrowing from the original argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Option {
        dash: Dash,
        name: &'a str,
        /// Everything after the first `=`, if the token had one.
        value: Option<&'a str>,
    },
    Positional(&'a str),
}

impl<'a> Token<'a> {
    pub fn is_positional(&self) -> bool {
        matches!(self, Token::Positional(_))
    }
}

/// Classify a single argument.
pub fn classify(arg: &str) -> Token<'_> {
    let (dash, body) = if let Some(rest) = arg.strip_prefix("--") {
        (Dash::Long, rest)
    } else if let Some(rest) = arg.strip_prefix('-') {
        (Dash::Short, rest)
    } else {
        return Token::Positional(arg);
    };

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    // `-`, `--` and `-=x` carry no option name.
    if name.is_empty() {
        return Token::Positional(arg);
    }

    Token::Option { dash, name, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_switch() {
        assert_eq!(
            classify("--debug"),
            Token::Option {
                dash: Dash::Long,
                name: "debug",
                value: None
            }
        );
    }

    #[test]
    fn test_long_with_value() {
        assert_eq!(
            classify("--threads=4"),
            Token::Option {
                dash: Dash::Long,
                name: "threads",
                value: Some("4")
            }
        );
    }

    #[test]
    fn test_short_with_value() {
        assert_eq!(
            classify("-t=1"),
            Token::Option {
                dash: Dash::Short,
                name: "t",
                value: Some("1")
            }
        );
    }

    #[test]
    fn test_value_keeps_second_equals() {
        assert_eq!(
            classify("--max_write==1"),
            Token::Option {
                dash: Dash::Long,
                name: "max_write",
                value: Some("=1")
            }
        );
    }

    #[test]
    fn test_empty_value_is_present() {
        assert_eq!(
            classify("--fsname="),
            Token::Option {
                dash: Dash::Long,
                name: "fsname",
                value: Some("")
            }
        );
    }

    #[test]
    fn test_single_dash_word_is_short_option() {
        assert_eq!(
            classify("-allow_other"),
            Token::Option {
                dash: Dash::Short,
                name: "allow_other",
                value: None
            }
        );
    }

    #[test]
    fn test_paths_are_positional() {
        assert_eq!(classify("/mnt/fuse"), Token::Positional("/mnt/fuse"));
        assert_eq!(classify("test_cmd_opts"), Token::Positional("test_cmd_opts"));
    }

    #[test]
    fn test_bare_dashes_are_positional() {
        assert!(classify("-").is_positional());
        assert!(classify("--").is_positional());
        assert!(classify("--=1").is_positional());
    }
}
