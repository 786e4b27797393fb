use thiserror::Error;

/// Result type for packing operations.
pub type PackResult<T> = Result<T, PackError>;

/// Why a member name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathViolation {
    /// A `..` component.
    ParentDir,
    /// A `.` component anywhere other than the leading position of a relative name.
    CurrentDir,
    /// Nothing is left once the root marker and `.` prefix are stripped.
    NoFileName,
}

impl std::fmt::Display for PathViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentDir => f.write_str("member names cannot contain `..`"),
            Self::CurrentDir => f.write_str("member names cannot contain `.`"),
            Self::NoFileName => f.write_str("member name has no file name component"),
        }
    }
}

/// How a member path collided with an existing directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathConflict {
    /// The leaf name is already taken by a file or a directory.
    Duplicate,
    /// A parent component is already a file.
    FileAsDirectory,
}

impl std::fmt::Display for PathConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => f.write_str("duplicate file"),
            Self::FileAsDirectory => f.write_str("a parent component is a file"),
        }
    }
}

/// Stable error codes for pack failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidMember,
    InvalidPath,
    DuplicatePath,
    ArchiveTooLarge,
    HeaderTooLarge,
    Serialization,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Errors that abort a pack call. No partial archive is ever produced.
#[derive(Debug, Error)]
pub enum PackError {
    /// The member record failed shape validation.
    #[error("illegal archive member (`members[{index}]`): {reason}")]
    InvalidMember { index: usize, reason: String },

    /// The member name contains a forbidden component.
    #[error("illegal member name `{name}` (`members[{index}]`): {reason}")]
    InvalidPath {
        index: usize,
        name: String,
        reason: PathViolation,
    },

    /// The member path collides with an entry already in the directory.
    #[error("{conflict}: `{name}` (`members[{index}]`)")]
    DuplicatePath {
        index: usize,
        name: String,
        conflict: PathConflict,
    },

    /// Cumulative payload size exceeds the configured ceiling.
    #[error("archive too big: {total_bytes} payload bytes exceeds limit of {limit}")]
    ArchiveTooLarge { total_bytes: u64, limit: u64 },

    /// The directory text does not fit the 32-bit size fields of the header.
    #[error("directory header too big: {directory_bytes} bytes")]
    HeaderTooLarge { directory_bytes: usize },

    #[error("directory serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidMember { .. } => ErrorCode::InvalidMember,
            Self::InvalidPath { .. } => ErrorCode::InvalidPath,
            Self::DuplicatePath { .. } => ErrorCode::DuplicatePath,
            Self::ArchiveTooLarge { .. } => ErrorCode::ArchiveTooLarge,
            Self::HeaderTooLarge { .. } => ErrorCode::HeaderTooLarge,
            Self::Serialization(_) => ErrorCode::Serialization,
        }
    }

    /// Index of the offending member, when the failure is tied to one.
    pub fn member_index(&self) -> Option<usize> {
        match self {
            Self::InvalidMember { index, .. }
            | Self::InvalidPath { index, .. }
            | Self::DuplicatePath { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Suggested exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Serialization(_) => 2,
            _ => 1,
        }
    }
}
