//! Connection tuning negotiated with the kernel during `INIT`.

use crate::error::{Result, ValueError};
use crate::options::{scan, OptionGroup, OptionSpec, Parsed};
use crate::value::{parse_unsigned, round_up_power_of_ten};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunables a user may set on the command line. Zero means "unset" for all but
/// `time_gran`, which is always a power of ten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnInfo {
    pub max_write: u32,
    pub max_read: u32,
    pub max_readahead: u32,
    /// Requests allowed to move from the background queue to pending.
    pub max_background: u32,
    /// Pending requests at which the kernel marks the filesystem congested.
    pub congestion_threshold: u32,
    /// Timestamp granularity in nanoseconds.
    pub time_gran: u32,
}

impl Default for ConnInfo {
    fn default() -> Self {
        ConnInfo {
            max_write: 0,
            max_read: 0,
            max_readahead: 0,
            max_background: 0,
            congestion_threshold: 0,
            time_gran: 1,
        }
    }
}

impl ConnInfo {
    /// Values offered to the kernel when the user sets nothing.
    pub fn kernel_defaults() -> Self {
        ConnInfo {
            max_write: u32::MAX,
            max_read: 0,
            max_readahead: 4,
            max_background: 4,
            congestion_threshold: 3,
            time_gran: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnKey {
    MaxWrite,
    MaxRead,
    MaxReadahead,
    MaxBackground,
    CongestionThreshold,
    TimeGran,
}

const CONN_OPTIONS: &[OptionSpec<ConnKey>] = &[
    OptionSpec::strict(None, "max_write", ConnKey::MaxWrite),
    OptionSpec::strict(None, "max_read", ConnKey::MaxRead),
    OptionSpec::strict(None, "max_readahead", ConnKey::MaxReadahead),
    OptionSpec::strict(None, "max_background", ConnKey::MaxBackground),
    OptionSpec::strict(None, "congestion_threshold", ConnKey::CongestionThreshold),
    OptionSpec::strict(None, "time_gran", ConnKey::TimeGran),
];

impl OptionGroup for ConnInfo {
    type Key = ConnKey;
    const LABEL: &'static str = "conn";

    fn options() -> &'static [OptionSpec<ConnKey>] {
        CONN_OPTIONS
    }

    fn apply(&mut self, key: ConnKey, value: Option<&str>) -> std::result::Result<(), ValueError> {
        let n = parse_unsigned(value.unwrap_or_default())?;
        match key {
            ConnKey::MaxWrite => self.max_write = n,
            ConnKey::MaxRead => self.max_read = n,
            ConnKey::MaxReadahead => self.max_readahead = n,
            ConnKey::MaxBackground => self.max_background = n,
            ConnKey::CongestionThreshold => self.congestion_threshold = n,
            ConnKey::TimeGran => {
                let gran = round_up_power_of_ten(n);
                if gran != n {
                    warn!(
                        "conn: time granularity must be a power of ten between 1 and 10^9 ns, using {} instead of {}",
                        gran, n
                    );
                }
                self.time_gran = gran;
            }
        }
        Ok(())
    }
}

/// Parse connection tunables on top of `info`.
pub fn parse_conn_info(mut info: ConnInfo, args: Vec<String>) -> Result<Parsed<ConnInfo>> {
    let leftover = scan(&mut info, args)?;
    Ok(Parsed {
        options: info,
        leftover,
    })
}
