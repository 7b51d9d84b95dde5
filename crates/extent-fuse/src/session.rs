//! Session option resolution.
//!
//! Runs the three option groups in sequence, each over what the previous one left
//! behind, and fills in names derived from the program when the user set none.

use crate::cmd_opts::{parse_cmd_opts, CmdOptions};
use crate::conn_info::{parse_conn_info, ConnInfo};
use crate::error::Result;
use crate::mount_opts::{parse_mnt_opts, MountOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Everything a session needs from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub cmd: CmdOptions,
    pub mount: MountOptions,
    pub conn: ConnInfo,
    /// Arguments no group recognized, excluding the program name.
    pub unknown: Vec<String>,
}

impl SessionOptions {
    /// Resolve session options from a full argument vector, program name first.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        let cmd = parse_cmd_opts(CmdOptions::session_defaults(), args)?;
        let mount = parse_mnt_opts(MountOptions::default(), cmd.leftover)?;
        let conn = parse_conn_info(ConnInfo::kernel_defaults(), mount.leftover)?;

        let mut session = SessionOptions {
            cmd: cmd.options,
            mount: mount.options,
            conn: conn.options,
            unknown: Vec::new(),
        };

        match conn.leftover.as_slice() {
            [] => {}
            [program] => session.default_names(program),
            [_, rest @ ..] => {
                warn!("unknown option(s): `{}`", rest.join(" "));
                session.unknown = rest.to_vec();
            }
        }

        debug!(
            "session: mount point {:?}, fs type {}, source {}",
            session.cmd.mount_point,
            session.mount.fs_type(),
            session.mount.source()
        );
        Ok(session)
    }

    fn default_names(&mut self, program: &str) {
        if program.starts_with('-') {
            warn!("argv[0] `{}` looks like an option, ignoring it", program);
            return;
        }
        let Some((_, name)) = program.rsplit_once('/') else {
            warn!("cannot detect the name of the running program from `{}`", program);
            return;
        };
        if name.is_empty() {
            warn!("cannot detect the name of the running program from `{}`", program);
            return;
        }
        if self.mount.fsname.is_none() {
            self.mount.fsname = Some(name.to_string());
        }
        if self.mount.subtype.is_none() {
            self.mount.subtype = Some(name.to_string());
        }
    }
}
