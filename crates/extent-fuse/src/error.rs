use thiserror::Error;

/// Reasons a single `=value` payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("empty value")]
    Empty,

    #[error("negative number `{0}`")]
    Negative(String),

    #[error("unexpected `=` in `{0}`")]
    NestedAssignment(String),

    #[error("expected a decimal number, got `{0}`")]
    NotDecimal(String),

    #[error("number `{0}` does not fit in 32 bits")]
    OutOfRange(String),

    #[error("unsupported mount flags `{0}`")]
    UnsupportedFlags(String),
}

/// Fatal errors that abort a whole parse.
#[derive(Debug, Error)]
pub enum OptionError {
    #[error("invalid value for `{option}`: {source}")]
    InvalidValue {
        option: String,
        #[source]
        source: ValueError,
    },

    #[error("no mount point given")]
    MissingMountPoint,

    #[error("bad mount point `{path}`: {source}")]
    BadMountPoint {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("mount point `{path}` is not a directory")]
    NotADirectory { path: String },

    #[error("unknown mode `{0}`")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, OptionError>;

impl OptionError {
    pub fn to_errno(&self) -> i32 {
        match self {
            OptionError::InvalidValue { .. } => libc::EINVAL,
            OptionError::MissingMountPoint => libc::EINVAL,
            OptionError::BadMountPoint { source, .. } => {
                source.raw_os_error().unwrap_or(libc::ENOENT)
            }
            OptionError::NotADirectory { .. } => libc::ENOTDIR,
            OptionError::UnknownMode(_) => libc::EINVAL,
        }
    }
}
