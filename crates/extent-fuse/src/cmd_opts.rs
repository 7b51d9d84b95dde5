//! Process-control options and the mount point.

use crate::error::{OptionError, Result, ValueError};
use crate::options::{scan, OptionGroup, OptionSpec, Parsed};
use crate::scanner::classify;
use crate::value::parse_unsigned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Worker threads used by the multithreaded loop when `--threads` is not given.
pub const DEFAULT_THREADS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmdOptions {
    pub help: bool,
    pub version: bool,
    /// Debug output. Always implies `foreground`.
    pub debug: bool,
    pub foreground: bool,
    pub multithread: bool,
    /// Give every worker its own clone of the kernel channel.
    pub clone_fd: bool,
    pub threads: u32,
    /// Canonical absolute path of the mount point.
    pub mount_point: Option<PathBuf>,
}

impl CmdOptions {
    /// Starting point for a real mount: like `default()` but with [`DEFAULT_THREADS`].
    pub fn session_defaults() -> Self {
        CmdOptions {
            threads: DEFAULT_THREADS,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdKey {
    Help,
    Version,
    Debug,
    Foreground,
    Multithread,
    CloneFd,
    Threads,
}

const CMD_OPTIONS: &[OptionSpec<CmdKey>] = &[
    OptionSpec::switch(Some("h"), "help", CmdKey::Help),
    OptionSpec::switch(Some("v"), "version", CmdKey::Version),
    OptionSpec::switch(Some("d"), "debug", CmdKey::Debug),
    OptionSpec::switch(Some("f"), "foreground", CmdKey::Foreground),
    OptionSpec::switch(Some("m"), "multithread", CmdKey::Multithread),
    OptionSpec::switch(Some("c"), "clonefd", CmdKey::CloneFd),
    OptionSpec::strict(Some("t"), "threads", CmdKey::Threads),
];

impl OptionGroup for CmdOptions {
    type Key = CmdKey;
    const LABEL: &'static str = "cmd";

    fn options() -> &'static [OptionSpec<CmdKey>] {
        CMD_OPTIONS
    }

    fn apply(&mut self, key: CmdKey, value: Option<&str>) -> std::result::Result<(), ValueError> {
        match key {
            CmdKey::Help => self.help = true,
            CmdKey::Version => self.version = true,
            CmdKey::Debug => {
                self.debug = true;
                self.foreground = true;
            }
            CmdKey::Foreground => self.foreground = true,
            CmdKey::Multithread => self.multithread = true,
            CmdKey::CloneFd => self.clone_fd = true,
            CmdKey::Threads => self.threads = parse_unsigned(value.unwrap_or_default())?,
        }
        Ok(())
    }
}

/// Canonicalize `raw` and make sure it is an existing directory.
pub fn resolve_mount_point(raw: &str) -> Result<PathBuf> {
    let path = std::fs::canonicalize(Path::new(raw)).map_err(|source| OptionError::BadMountPoint {
        path: raw.to_string(),
        source,
    })?;

    if !path.is_dir() {
        return Err(OptionError::NotADirectory {
            path: path.display().to_string(),
        });
    }

    Ok(path)
}

/// Parse process-control options on top of `opts`.
///
/// The last positional argument is taken as the mount point and removed from the
/// leftovers; it must resolve to an accessible directory.
pub fn parse_cmd_opts(mut opts: CmdOptions, args: Vec<String>) -> Result<Parsed<CmdOptions>> {
    let mut leftover = scan(&mut opts, args)?;

    let index = leftover
        .iter()
        .rposition(|arg| classify(arg).is_positional())
        .ok_or(OptionError::MissingMountPoint)?;
    let raw = leftover.remove(index);
    let mount_point = resolve_mount_point(&raw)?;
    debug!("cmd: mount point {}", mount_point.display());
    opts.mount_point = Some(mount_point);

    Ok(Parsed {
        options: opts,
        leftover,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn with_dir(dir: &TempDir, list: &[&str]) -> Vec<String> {
        let mut all = args(list);
        all.push(dir.path().display().to_string());
        all
    }

    #[test]
    fn test_defaults() {
        let opts = CmdOptions::default();
        assert!(!opts.help && !opts.debug && !opts.foreground);
        assert_eq!(opts.threads, 0);
        assert!(opts.mount_point.is_none());
        assert_eq!(CmdOptions::session_defaults().threads, DEFAULT_THREADS);
    }

    #[test]
    fn test_each_switch_sets_only_its_field() {
        let dir = TempDir::new().unwrap();
        let cases: [(&str, fn(&CmdOptions) -> bool); 6] = [
            ("--help", |o| o.help),
            ("--version", |o| o.version),
            ("--foreground", |o| o.foreground),
            ("--multithread", |o| o.multithread),
            ("--clonefd", |o| o.clone_fd),
            ("-c", |o| o.clone_fd),
        ];
        for (flag, get) in cases {
            let parsed = parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &[flag])).unwrap();
            assert!(get(&parsed.options), "{flag} not applied");
            assert!(!parsed.options.debug, "{flag} leaked into debug");
            assert_eq!(parsed.unknown(), 0);
        }
    }

    #[test]
    fn test_debug_implies_foreground() {
        let dir = TempDir::new().unwrap();
        for flag in ["-d", "--debug"] {
            let parsed = parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &[flag])).unwrap();
            assert!(parsed.options.debug);
            assert!(parsed.options.foreground);
            assert!(!parsed.options.multithread);
        }
    }

    #[test]
    fn test_threads_short_and_long() {
        let dir = TempDir::new().unwrap();
        let parsed = parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &["-t=1"])).unwrap();
        assert_eq!(parsed.options.threads, 1);
        let parsed =
            parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &["--threads=16"])).unwrap();
        assert_eq!(parsed.options.threads, 16);
    }

    #[test]
    fn test_malformed_threads_are_fatal() {
        let dir = TempDir::new().unwrap();
        for bad in ["-t=a", "--threads=aa", "-t==a", "--threads==aa", "-t=-10", "--threads=-10"] {
            let err = parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &[bad])).unwrap_err();
            assert!(
                matches!(err, OptionError::InvalidValue { .. }),
                "{bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_mount_point_is_canonical() {
        let dir = TempDir::new().unwrap();
        let parsed = parse_cmd_opts(CmdOptions::default(), with_dir(&dir, &[])).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(parsed.options.mount_point, Some(expected));
    }

    #[test]
    fn test_last_positional_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let list = vec![
            first.path().display().to_string(),
            "--none".to_string(),
            second.path().display().to_string(),
            "-n".to_string(),
        ];
        let parsed = parse_cmd_opts(CmdOptions::default(), list).unwrap();
        let expected = std::fs::canonicalize(second.path()).unwrap();
        assert_eq!(parsed.options.mount_point, Some(expected));
        assert_eq!(parsed.unknown(), 3);
    }

    #[test]
    fn test_unknown_switches_counted() {
        let dir = TempDir::new().unwrap();
        let parsed = parse_cmd_opts(
            CmdOptions::default(),
            with_dir(&dir, &["prog", "mode", "-n", "-none", "--n", "--none"]),
        )
        .unwrap();
        assert_eq!(parsed.unknown(), 6);
    }

    #[test]
    fn test_missing_mount_point() {
        let err = parse_cmd_opts(CmdOptions::default(), args(&["-d"])).unwrap_err();
        assert!(matches!(err, OptionError::MissingMountPoint));
    }

    #[test]
    fn test_nonexistent_mount_point() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("none").display().to_string();
        let err = parse_cmd_opts(CmdOptions::default(), vec![missing]).unwrap_err();
        assert!(matches!(err, OptionError::BadMountPoint { .. }));
    }

    #[test]
    fn test_file_mount_point_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, b"x").unwrap();
        let err = parse_cmd_opts(CmdOptions::default(), vec![file.display().to_string()])
            .unwrap_err();
        assert!(matches!(err, OptionError::NotADirectory { .. }));
    }
}
