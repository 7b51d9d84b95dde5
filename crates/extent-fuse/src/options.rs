//! Declarative option tables and the single-pass scanner that applies them.
//!
//! Each option group (command line, mount, connection) describes its recognized options
//! as a static table of [`OptionSpec`]s. Value-taking options carry a [`ValuePolicy`]
//! deciding whether a malformed value aborts the parse or is ignored.

use crate::error::{OptionError, Result, ValueError};
use crate::scanner::{classify, Dash, Token};
use tracing::{debug, warn};

/// What happens when an option's value fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// The whole parse fails.
    Strict,
    /// The value is logged and ignored; the option still counts as recognized.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Bare switch: `-x` or `--name`.
    Switch,
    /// Requires `=value`: `-x=value` or `--name=value`.
    Value(ValuePolicy),
}

/// One recognized option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec<K> {
    pub short: Option<&'static str>,
    pub long: &'static str,
    pub arity: Arity,
    pub key: K,
}

impl<K> OptionSpec<K> {
    pub const fn switch(short: Option<&'static str>, long: &'static str, key: K) -> Self {
        OptionSpec {
            short,
            long,
            arity: Arity::Switch,
            key,
        }
    }

    pub const fn strict(short: Option<&'static str>, long: &'static str, key: K) -> Self {
        OptionSpec {
            short,
            long,
            arity: Arity::Value(ValuePolicy::Strict),
            key,
        }
    }

    pub const fn lenient(short: Option<&'static str>, long: &'static str, key: K) -> Self {
        OptionSpec {
            short,
            long,
            arity: Arity::Value(ValuePolicy::Lenient),
            key,
        }
    }

    fn matches(&self, dash: Dash, name: &str, has_value: bool) -> bool {
        let name_matches = match dash {
            Dash::Short => self.short == Some(name),
            Dash::Long => self.long == name,
        };
        let arity_matches = match self.arity {
            Arity::Switch => !has_value,
            Arity::Value(_) => has_value,
        };
        name_matches && arity_matches
    }

    fn policy(&self) -> ValuePolicy {
        match self.arity {
            Arity::Switch => ValuePolicy::Strict,
            Arity::Value(policy) => policy,
        }
    }
}

/// A record that can be filled from command-line options.
pub trait OptionGroup {
    type Key: Copy + 'static;

    /// Short label used in diagnostics and logs, e.g. `cmd`.
    const LABEL: &'static str;

    fn options() -> &'static [OptionSpec<Self::Key>];

    /// Store one matched option. `value` is `Some` exactly for value-taking options.
    fn apply(&mut self, key: Self::Key, value: Option<&str>) -> std::result::Result<(), ValueError>;
}

/// A parsed record plus the arguments its group did not recognize, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub options: T,
    pub leftover: Vec<String>,
}

impl<T> Parsed<T> {
    /// Number of unrecognized tokens.
    pub fn unknown(&self) -> usize {
        self.leftover.len()
    }
}

fn find<'s, 'a, K>(
    table: &'s [OptionSpec<K>],
    arg: &'a str,
) -> Option<(&'s OptionSpec<K>, Option<&'a str>)> {
    let Token::Option { dash, name, value } = classify(arg) else {
        return None;
    };
    table
        .iter()
        .find(|spec| spec.matches(dash, name, value.is_some()))
        .map(|spec| (spec, value))
}

/// Apply every recognized option in `args` to `group` and return the rest.
pub fn scan<G: OptionGroup>(group: &mut G, args: Vec<String>) -> Result<Vec<String>> {
    let mut leftover = Vec::new();
    for arg in args {
        match find(G::options(), &arg) {
            Some((spec, value)) => match group.apply(spec.key, value) {
                Ok(()) => debug!("{}: accepted `{}`", G::LABEL, arg),
                Err(source) => match spec.policy() {
                    ValuePolicy::Strict => {
                        return Err(OptionError::InvalidValue {
                            option: arg.clone(),
                            source,
                        });
                    }
                    ValuePolicy::Lenient => {
                        warn!("{}: ignoring `{}`: {}", G::LABEL, arg, source);
                    }
                },
            },
            None => leftover.push(arg),
        }
    }
    Ok(leftover)
}
