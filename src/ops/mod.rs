//! Path-level filesystem operations (§4.6), one module per operation in the
//! teacher's `vfs/` layout. Each function takes an already-joined path
//! string and a [`GraphGateway`], and returns a plain [`Result`] --- no
//! `fuser` types, no inode numbers. [`crate::fs_ops`] is the only caller
//! that knows about either; it translates inodes to paths on the way in and
//! translates a `Result` into a `fuser::Reply*` on the way out. Keeping the
//! boundary here means every operation can be driven directly in tests
//! against [`crate::graph::in_memory::InMemoryGateway`] without a kernel.

pub mod access;
pub mod attr;
pub mod create;
pub mod getattr;
pub mod mkdir;
pub mod read;
pub mod readdir;
pub mod rename;
pub mod rmdir;
pub mod truncate;
pub mod unlink;
pub mod write;

pub use attr::{Attr, Kind};
