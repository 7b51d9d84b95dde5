//! One-line diagnostic rendering of parsed option groups.
//!
//! Format: `<label>: <field>,<field>,...; unknown: <count>`. Booleans render as `1`/`0`
//! and unset strings as [`NULL_MARKER`].

use crate::cmd_opts::CmdOptions;
use crate::conn_info::ConnInfo;
use crate::mount_opts::MountOptions;
use crate::options::{OptionGroup, Parsed};

pub const NULL_MARKER: &str = "(null)";

/// Printed instead of a diagnostic line when parsing fails.
pub const FAILURE_MARKER: &str = "-1";

/// Ordered field values of a record, as they appear in its diagnostic line.
pub trait Diagnostic: OptionGroup {
    fn fields(&self) -> Vec<String>;
}

fn flag(b: bool) -> String {
    String::from(if b { "1" } else { "0" })
}

fn or_null(s: Option<&str>) -> String {
    s.unwrap_or(NULL_MARKER).to_string()
}

impl Diagnostic for CmdOptions {
    fn fields(&self) -> Vec<String> {
        vec![
            flag(self.help),
            flag(self.version),
            flag(self.debug),
            flag(self.foreground),
            flag(self.multithread),
            flag(self.clone_fd),
            self.threads.to_string(),
            self.mount_point
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| NULL_MARKER.to_string()),
        ]
    }
}

impl Diagnostic for MountOptions {
    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            flag(self.allow_other),
            flag(self.auto_unmount),
            self.flags.encoding().to_string(),
        ];
        fields.extend(self.flags.components().into_iter().map(str::to_string));
        fields.push(or_null(self.fsname.as_deref()));
        fields.push(or_null(self.subtype.as_deref()));
        fields
    }
}

impl Diagnostic for ConnInfo {
    fn fields(&self) -> Vec<String> {
        [
            self.max_write,
            self.max_read,
            self.max_readahead,
            self.max_background,
            self.congestion_threshold,
            self.time_gran,
        ]
        .iter()
        .map(u32::to_string)
        .collect()
    }
}

pub fn diagnostic_line<T: Diagnostic>(parsed: &Parsed<T>) -> String {
    format!(
        "{}: {}; unknown: {}",
        T::LABEL,
        parsed.options.fields().join(","),
        parsed.unknown()
    )
}
