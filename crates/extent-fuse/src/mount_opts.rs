use crate::error::{Result, ValueError};
use crate::flags::MountFlags;
use crate::options::{scan, OptionGroup, OptionSpec, Parsed};
use serde::{Deserialize, Serialize};
use std::os::unix::io::RawFd;

/// Device used as the mount source when neither fsname nor subtype is set.
pub const FUSE_DEVICE: &str = "/dev/fuse";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountOptions {
    /// Allow users other than the mounting user to access the filesystem.
    pub allow_other: bool,
    /// Unmount when the daemon exits. Only honoured by fusermount.
    pub auto_unmount: bool,
    pub flags: MountFlags,
    pub fsname: Option<String>,
    /// Filesystem type becomes `fuse.<subtype>`.
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKey {
    AllowOther,
    AutoUnmount,
    Flags,
    FsName,
    SubType,
}

const MOUNT_OPTIONS: &[OptionSpec<MountKey>] = &[
    OptionSpec::switch(None, "allow_other", MountKey::AllowOther),
    OptionSpec::switch(None, "auto_unmount", MountKey::AutoUnmount),
    OptionSpec::lenient(None, "flags", MountKey::Flags),
    OptionSpec::lenient(None, "fsname", MountKey::FsName),
    OptionSpec::lenient(None, "subtype", MountKey::SubType),
];

fn non_empty(value: Option<&str>) -> std::result::Result<String, ValueError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValueError::Empty),
    }
}

impl OptionGroup for MountOptions {
    type Key = MountKey;
    const LABEL: &'static str = "mnt";

    fn options() -> &'static [OptionSpec<MountKey>] {
        MOUNT_OPTIONS
    }

    fn apply(&mut self, key: MountKey, value: Option<&str>) -> std::result::Result<(), ValueError> {
        match key {
            MountKey::AllowOther => self.allow_other = true,
            MountKey::AutoUnmount => self.auto_unmount = true,
            MountKey::Flags => self.flags = MountFlags::parse(value.unwrap_or_default())?,
            MountKey::FsName => self.fsname = Some(non_empty(value)?),
            MountKey::SubType => self.subtype = Some(non_empty(value)?),
        }
        Ok(())
    }
}

impl MountOptions {
    /// The `-o` argument handed to fusermount.
    pub fn fusermount_options(&self) -> String {
        let mut opts: Vec<String> = self
            .flags
            .components()
            .into_iter()
            .map(str::to_string)
            .collect();

        if self.allow_other {
            opts.push("allow_other".to_string());
        }
        if self.auto_unmount {
            opts.push("auto_unmount".to_string());
        }
        if let Some(fsname) = &self.fsname {
            opts.push(format!("fsname={}", fsname));
        }
        if let Some(subtype) = &self.subtype {
            opts.push(format!("subtype={}", subtype));
        }

        opts.join(",")
    }

    /// Filesystem type passed to `mount(2)`.
    pub fn fs_type(&self) -> String {
        match &self.subtype {
            Some(subtype) => format!("fuse.{}", subtype),
            None => "fuse".to_string(),
        }
    }

    /// Mount source passed to `mount(2)`.
    pub fn source(&self) -> &str {
        self.fsname
            .as_deref()
            .or(self.subtype.as_deref())
            .unwrap_or(FUSE_DEVICE)
    }

    /// Source for kernels that reject `fuse.<subtype>`; the type is then plain `fuse`.
    pub fn legacy_source(&self) -> String {
        match (&self.fsname, &self.subtype) {
            (Some(fsname), Some(subtype)) => format!("{}#{}", fsname, subtype),
            (None, Some(subtype)) => subtype.clone(),
            _ => self.source().to_string(),
        }
    }

    /// Data string for a direct `mount(2)` of the opened fuse device.
    pub fn kernel_data(&self, fd: RawFd, root_mode: u32, uid: u32, gid: u32) -> String {
        let data = format!(
            "fd={},rootmode={:o},user_id={},group_id={}",
            fd, root_mode, uid, gid
        );
        if self.allow_other {
            format!("allow_other,{}", data)
        } else {
            data
        }
    }
}

/// Parse mount options on top of `opts`. Never fails on malformed values.
pub fn parse_mnt_opts(mut opts: MountOptions, args: Vec<String>) -> Result<Parsed<MountOptions>> {
    let leftover = scan(&mut opts, args)?;
    Ok(Parsed {
        options: opts,
        leftover,
    })
}
