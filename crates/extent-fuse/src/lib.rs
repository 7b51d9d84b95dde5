#![warn(missing_docs)]

//! fuse-extent command-line option engine.
//!
//! Parses the three option groups of a FUSE mount helper (process control, mount
//! configuration and connection tuning), validates their values and renders them as
//! one-line diagnostics.

pub mod cmd_opts;
pub mod conn_info;
pub mod diag;
pub mod error;
pub mod flags;
pub mod mode;
pub mod mount_opts;
pub mod options;
pub mod scanner;
pub mod session;
pub mod value;

pub use cmd_opts::{parse_cmd_opts, CmdOptions};
pub use conn_info::{parse_conn_info, ConnInfo};
pub use error::{OptionError, Result, ValueError};
pub use flags::MountFlags;
pub use mode::{Mode, ParseResult};
pub use mount_opts::{parse_mnt_opts, MountOptions};
pub use options::Parsed;
pub use session::SessionOptions;

/// Version banner printed for `--version`.
pub const VERSION_BANNER: &str = concat!("fuse-extent v", env!("CARGO_PKG_VERSION"));
