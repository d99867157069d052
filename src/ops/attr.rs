//! The attribute shape [`getattr`](super::getattr) and [`crate::fs_ops`]
//! agree on, independent of `fuser::FileAttr` so [`super::getattr`] stays
//! testable without linking against `fuser`.

/// What a path denotes, for stat purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Directory,
    File,
}

/// The fields of §4.6's `getattr` contract that vary by path; the fixed
/// parts (mode bits, nlink, timestamps, uid/gid) are §4.6 constants that
/// [`crate::fs_ops`] fills in itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    pub kind: Kind,
    /// Byte length of the stored value; always 0 for directories.
    pub size: u64,
}
