//! Error taxonomy shared by every layer of the filesystem.
//!
//! Mirrors the POSIX errno taxonomy a FUSE callback must eventually produce.
//! Every fallible function below [`crate::fs_ops`] returns [`GraphFsError`];
//! [`crate::fs_ops`] is the single place that turns one into an errno.

/// Errors produced while resolving paths, querying the graph, or applying a
/// mutation. Each variant corresponds to exactly one row of the errno table.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GraphFsError {
    /// A required path prefix or leaf does not exist.
    #[error("no such file or directory")]
    NotFound,

    /// A create/mkdir collided with an existing group or file (invariant G1).
    #[error("file or group already exists")]
    Exists,

    /// `rmdir` was attempted on a group that still has attached files.
    #[error("group is not empty")]
    NotEmpty,

    /// A file operation (open/create/read/write) targeted a group or the root.
    #[error("is a directory")]
    IsDir,

    /// A mutation targeted the root, or a rename attempted folder-into-folder.
    #[error("operation not permitted")]
    Permission,

    /// A malformed path, non-UTF8 argument, or illegal identifier character.
    #[error("invalid argument")]
    Invalid,

    /// The underlying graph store reported an error.
    #[error("I/O error: {0}")]
    Io(String),

    /// An internal invariant was violated; surfaced as EBADR, never expected
    /// to occur for well-formed call sequences.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GraphFsError {
    /// Maps this error onto the errno this crate promises to return to the
    /// kernel for it (§7 of the specification).
    pub fn to_errno(&self) -> i32 {
        match self {
            GraphFsError::NotFound => libc::ENOENT,
            GraphFsError::Exists => libc::EEXIST,
            GraphFsError::NotEmpty => libc::ENOTEMPTY,
            GraphFsError::IsDir => libc::EISDIR,
            GraphFsError::Permission => libc::EPERM,
            GraphFsError::Invalid => libc::EINVAL,
            GraphFsError::Io(_) => libc::EIO,
            GraphFsError::Internal(_) => libc::EBADR,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphFsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errno_mapping_matches_spec_table() {
        assert_eq!(GraphFsError::NotFound.to_errno(), libc::ENOENT);
        assert_eq!(GraphFsError::Exists.to_errno(), libc::EEXIST);
        assert_eq!(GraphFsError::NotEmpty.to_errno(), libc::ENOTEMPTY);
        assert_eq!(GraphFsError::IsDir.to_errno(), libc::EISDIR);
        assert_eq!(GraphFsError::Permission.to_errno(), libc::EPERM);
        assert_eq!(GraphFsError::Invalid.to_errno(), libc::EINVAL);
        assert_eq!(GraphFsError::Io(String::new()).to_errno(), libc::EIO);
        assert_eq!(GraphFsError::Internal(String::new()).to_errno(), libc::EBADR);
    }
}
