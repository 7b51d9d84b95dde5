//! Self-test modes: one option group parsed in isolation.

use crate::cmd_opts::{parse_cmd_opts, CmdOptions};
use crate::conn_info::{parse_conn_info, ConnInfo};
use crate::diag::diagnostic_line;
use crate::error::{OptionError, Result};
use crate::mount_opts::{parse_mnt_opts, MountOptions};
use crate::options::Parsed;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cmd,
    Mnt,
    Conn,
}

impl FromStr for Mode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "test_cmd_opts" => Ok(Mode::Cmd),
            "test_mnt_opts" => Ok(Mode::Mnt),
            "test_conn_info" => Ok(Mode::Conn),
            other => Err(OptionError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Cmd(Parsed<CmdOptions>),
    Mnt(Parsed<MountOptions>),
    Conn(Parsed<ConnInfo>),
}

impl Mode {
    /// Parse `args` with this mode's group, starting from zeroed defaults.
    pub fn parse(self, args: Vec<String>) -> Result<ParseResult> {
        match self {
            Mode::Cmd => parse_cmd_opts(CmdOptions::default(), args).map(ParseResult::Cmd),
            Mode::Mnt => parse_mnt_opts(MountOptions::default(), args).map(ParseResult::Mnt),
            Mode::Conn => parse_conn_info(ConnInfo::default(), args).map(ParseResult::Conn),
        }
    }
}

impl ParseResult {
    pub fn unknown(&self) -> usize {
        match self {
            ParseResult::Cmd(p) => p.unknown(),
            ParseResult::Mnt(p) => p.unknown(),
            ParseResult::Conn(p) => p.unknown(),
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match self {
            ParseResult::Cmd(p) => diagnostic_line(p),
            ParseResult::Mnt(p) => diagnostic_line(p),
            ParseResult::Conn(p) => diagnostic_line(p),
        };
        f.write_str(&line)
    }
}
