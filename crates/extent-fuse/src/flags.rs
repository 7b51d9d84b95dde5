//! Mount flag encoding.
//!
//! The packed value is the `mountflags` word handed to `mount(2)`. Only two states are
//! produced: the read-write baseline (`MS_NOSUID | MS_NODEV`) and its read-only variant.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MS_RDONLY: u64 = libc::MS_RDONLY as u64;
const MS_NOSUID: u64 = libc::MS_NOSUID as u64;
const MS_NODEV: u64 = libc::MS_NODEV as u64;
const MS_NOEXEC: u64 = libc::MS_NOEXEC as u64;
const MS_SYNCHRONOUS: u64 = libc::MS_SYNCHRONOUS as u64;
const MS_NOATIME: u64 = libc::MS_NOATIME as u64;

/// `(cleared, set, bit)` for every flag word, in rendering order.
const FLAG_PAIRS: [(&str, &str, u64); 6] = [
    ("rw", "ro", MS_RDONLY),
    ("suid", "nosuid", MS_NOSUID),
    ("dev", "nodev", MS_NODEV),
    ("exec", "noexec", MS_NOEXEC),
    ("async", "sync", MS_SYNCHRONOUS),
    ("atime", "noatime", MS_NOATIME),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountFlags {
    bits: u64,
}

impl Default for MountFlags {
    fn default() -> Self {
        Self::read_write()
    }
}

impl MountFlags {
    pub fn read_write() -> Self {
        MountFlags {
            bits: MS_NOSUID | MS_NODEV,
        }
    }

    pub fn read_only() -> Self {
        MountFlags {
            bits: MS_RDONLY | MS_NOSUID | MS_NODEV,
        }
    }

    /// Decode a `--flags=` payload. Only `ro` and `rw` are understood.
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        match value {
            "rw" => Ok(Self::read_write()),
            "ro" => Ok(Self::read_only()),
            other => Err(ValueError::UnsupportedFlags(other.to_string())),
        }
    }

    /// The packed `mount(2)` flags word.
    pub fn encoding(&self) -> u64 {
        self.bits
    }

    pub fn is_read_only(&self) -> bool {
        self.bits & MS_RDONLY != 0
    }

    /// One word per flag pair, e.g. `["rw", "nosuid", "nodev", "exec", "async", "atime"]`.
    pub fn components(&self) -> Vec<&'static str> {
        FLAG_PAIRS
            .iter()
            .map(|&(off, on, bit)| if self.bits & bit != 0 { on } else { off })
            .collect()
    }
}

impl fmt::Display for MountFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components().join(","))
    }
}
