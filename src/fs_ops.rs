//! FUSE callback surface (§4.6), implemented against the `fuser` low-level
//! `Filesystem` trait.
//!
//! `fuser` addresses objects by inode, not path, and its `Filesystem` trait
//! is synchronous while [`crate::graph::GraphGateway`] is async. This module
//! bridges both gaps: [`InodeTable`] (§4.7) translates inode numbers to the
//! group-path segments the rest of the crate reasons about, and a single
//! current-thread Tokio runtime is driven to completion once per callback,
//! matching the "one request in flight" model of §5 rather than
//! reintroducing concurrency underneath a supposedly single-threaded mount.
//!
//! The actual operation semantics live in [`crate::ops`], one module per
//! callback; this file is the inode <-> path bridge plus `fuser` reply
//! marshaling around them.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use fuser::{
    FileAttr, FileType, Filesystem, ReplyAttr, ReplyCreate, ReplyData, ReplyDirectory, ReplyEmpty,
    ReplyEntry, ReplyOpen, ReplyStatfs, ReplyWrite, Request, TimeOrNow,
};
use tracing::{debug, warn};

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::inode_table::{InodeTable, ROOT_INO};
use crate::ops::{self, Kind};
use crate::path_codec;
use crate::resolver::Leaf;

/// Attribute cache TTL handed back to the kernel with every reply. Kept
/// short because the graph can change from outside this process (§5,
/// Shared state) and there is no invalidation channel back to the kernel.
const TTL: Duration = Duration::from_secs(1);

/// Orchestrates §4.6 against a [`GraphGateway`] and presents the result as
/// a `fuser::Filesystem`.
pub struct GraphFs {
    graph: Arc<dyn GraphGateway>,
    runtime: tokio::runtime::Runtime,
    inodes: InodeTable,
    start_time: SystemTime,
}

impl GraphFs {
    pub fn new(graph: Arc<dyn GraphGateway>) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to start the graph gateway runtime");
        Self { graph, runtime, inodes: InodeTable::new(), start_time: SystemTime::now() }
    }

    /// Drives `fut` to completion on this filesystem's single-threaded
    /// runtime, matching §5's "one gateway call in flight at a time".
    fn block<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    fn segments_for(&self, ino: u64) -> Result<Vec<String>> {
        self.inodes.segments(ino).ok_or(GraphFsError::NotFound)
    }

    fn path_for(&self, ino: u64) -> Result<(Vec<String>, String)> {
        let segments = self.segments_for(ino)?;
        let path = path_codec::join(&segments);
        Ok((segments, path))
    }

    /// Builds the child segments and joined path string for `parent`/`name`.
    fn child(&self, parent: u64, name: &OsStr) -> Result<(Vec<String>, String)> {
        let mut segments = self.segments_for(parent)?;
        let name = name.to_str().ok_or(GraphFsError::Invalid)?.to_string();
        segments.push(name);
        let path = path_codec::join(&segments);
        Ok((segments, path))
    }

    fn dir_attr(&self, ino: u64) -> FileAttr {
        FileAttr {
            ino,
            size: 1024,
            blocks: 1,
            atime: self.start_time,
            mtime: self.start_time,
            ctime: self.start_time,
            crtime: self.start_time,
            kind: FileType::Directory,
            perm: 0o755,
            nlink: 2,
            uid: unsafe { libc::getuid() },
            gid: unsafe { libc::getgid() },
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }

    fn file_attr(&self, ino: u64, size: u64) -> FileAttr {
        FileAttr {
            ino,
            size,
            blocks: size.div_ceil(512).max(1),
            atime: self.start_time,
            mtime: self.start_time,
            ctime: self.start_time,
            crtime: self.start_time,
            kind: FileType::RegularFile,
            perm: 0o755,
            nlink: 1,
            uid: unsafe { libc::getuid() },
            gid: unsafe { libc::getgid() },
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }

    fn attr_from(&self, ino: u64, attr: ops::Attr) -> FileAttr {
        match attr.kind {
            Kind::Directory => self.dir_attr(ino),
            Kind::File => self.file_attr(ino, attr.size),
        }
    }

    /// Logs a non-ENOENT error and returns its errno, for the common
    /// "run a fallible op, reply with its errno" pattern (§10.2).
    fn fail(op: &str, path: &str, err: GraphFsError) -> i32 {
        let errno = err.to_errno();
        if errno != libc::ENOENT {
            warn!(op, path, error = %err, "operation failed");
        }
        errno
    }
}

impl Filesystem for GraphFs {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let (segments, path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "lookup", path, "");

        match self.block(ops::getattr::getattr(self.graph.as_ref(), &path)) {
            Ok(attr) => {
                let ino = self.inodes.ensure(segments);
                reply.entry(&TTL, &self.attr_from(ino, attr), 0);
            }
            Err(e) => reply.error(Self::fail("lookup", &path, e)),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "getattr", path, "");

        match self.block(ops::getattr::getattr(self.graph.as_ref(), &path)) {
            Ok(attr) => reply.attr(&TTL, &self.attr_from(ino, attr)),
            Err(e) => reply.error(Self::fail("getattr", &path, e)),
        }
    }

    fn setattr(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _mode: Option<u32>,
        _uid: Option<u32>,
        _gid: Option<u32>,
        size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        // chmod/chown/utimens are accepted but have no effect (§4.6); only
        // a size change (truncate) mutates the graph, and it always clears
        // the value regardless of the requested length.
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "setattr", path, truncate = size.is_some(), "");

        if size.is_some() {
            if let Err(e) = self.block(ops::truncate::truncate(self.graph.as_ref(), &path)) {
                return reply.error(Self::fail("setattr", &path, e));
            }
        }

        match self.block(ops::getattr::getattr(self.graph.as_ref(), &path)) {
            Ok(attr) => reply.attr(&TTL, &self.attr_from(ino, attr)),
            Err(e) => reply.error(Self::fail("setattr", &path, e)),
        }
    }

    fn mkdir(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        _mode: u32,
        _umask: u32,
        reply: ReplyEntry,
    ) {
        let (segments, path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "mkdir", path, "");

        match self.block(ops::mkdir::mkdir(self.graph.as_ref(), &path)) {
            Ok(()) => {
                let ino = self.inodes.ensure(segments);
                reply.entry(&TTL, &self.dir_attr(ino), 0);
            }
            Err(e) => reply.error(Self::fail("mkdir", &path, e)),
        }
    }

    fn rmdir(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let (segments, path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "rmdir", path, "");

        match self.block(ops::rmdir::rmdir(self.graph.as_ref(), &path)) {
            Ok(()) => {
                self.inodes.remove(&segments);
                reply.ok();
            }
            Err(e) => reply.error(Self::fail("rmdir", &path, e)),
        }
    }

    fn create(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        _mode: u32,
        _umask: u32,
        _flags: i32,
        reply: ReplyCreate,
    ) {
        let parent_segments = match self.segments_for(parent) {
            Ok(s) => s,
            Err(e) => return reply.error(e.to_errno()),
        };
        let (segments, path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "create", path, "");

        match self.block(ops::create::create(self.graph.as_ref(), &path, &parent_segments)) {
            Ok(()) => {
                let ino = self.inodes.ensure(segments);
                reply.created(&TTL, &self.file_attr(ino, 0), 0, 0, 0);
            }
            Err(e) => reply.error(Self::fail("create", &path, e)),
        }
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, _flags: i32, reply: ReplyOpen) {
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "open", path, "");

        match self.block(ops::read::open(self.graph.as_ref(), &path)) {
            Ok(()) => reply.opened(0, 0),
            Err(e) => reply.error(Self::fail("open", &path, e)),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        _offset: i64,
        _size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        // Offset and size are ignored: the whole stored value is always
        // returned (§4.6, Open Question O3).
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "read", path, "");

        match self.block(ops::read::read(self.graph.as_ref(), &path)) {
            Ok(data) => reply.data(&data),
            Err(e) => reply.error(Self::fail("read", &path, e)),
        }
    }

    fn write(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        _offset: i64,
        data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        // The stored value replaces prior content entirely, regardless of
        // offset (§1, Non-goals); `data` must be valid UTF-8 (§9, IQ3).
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "write", path, len = data.len(), "");

        match self.block(ops::write::write(self.graph.as_ref(), &path, data)) {
            Ok(()) => reply.written(data.len() as u32),
            Err(e) => reply.error(Self::fail("write", &path, e)),
        }
    }

    fn unlink(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEmpty) {
        let (segments, path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "unlink", path, "");

        match self.block(ops::unlink::unlink(self.graph.as_ref(), &path)) {
            Ok(()) => {
                self.inodes.remove(&segments);
                reply.ok();
            }
            Err(e) => reply.error(Self::fail("unlink", &path, e)),
        }
    }

    fn rename(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        newparent: u64,
        newname: &OsStr,
        _flags: u32,
        reply: ReplyEmpty,
    ) {
        let (old_segments, old_path) = match self.child(parent, name) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        let (new_segments, new_path) = match self.child(newparent, newname) {
            Ok(v) => v,
            Err(e) => return reply.error(e.to_errno()),
        };
        debug!(op = "rename", old_path, new_path, "");

        match self.block(ops::rename::rename(self.graph.as_ref(), &old_path, &new_path)) {
            Ok((Leaf::File(_), Leaf::File(_))) if name != newname => {
                // Different leaf names, both files: the source was absorbed
                // into the pre-existing destination, not relocated. Its own
                // inode (if any) keeps pointing at `new_segments`.
                self.inodes.remove(&old_segments);
                reply.ok();
            }
            Ok(_) => {
                // Same leaf name (a relocate between groups) or any other
                // leaf-kind pairing: the source inode now denotes
                // `new_segments`.
                let old_ino = self.inodes.ensure(old_segments.clone());
                self.inodes.rename(old_ino, new_segments.clone());
                reply.ok();
            }
            Err(e) => reply.error(Self::fail("rename", &old_path, e)),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let segments = match self.segments_for(ino) {
            Ok(s) => s,
            Err(e) => return reply.error(e.to_errno()),
        };
        let path = path_codec::join(&segments);
        debug!(op = "readdir", path, "");

        let entries =
            match self.block(ops::readdir::readdir(self.graph.as_ref(), &path, &segments)) {
                Ok(e) => e,
                Err(e) => return reply.error(Self::fail("readdir", &path, e)),
            };

        let parent_ino = if ino == ROOT_INO {
            ROOT_INO
        } else {
            let mut parent_segments = segments.clone();
            parent_segments.pop();
            self.inodes.ensure(parent_segments)
        };

        let mut all = vec![(ino, FileType::Directory, ".".to_string())];
        all.push((parent_ino, FileType::Directory, "..".to_string()));
        for entry in entries {
            let (name, kind) = match entry {
                crate::directory_view::Entry::Group(name) => (name, FileType::Directory),
                crate::directory_view::Entry::File(name) => (name, FileType::RegularFile),
            };
            let mut child_segments = segments.clone();
            child_segments.push(name.clone());
            let child_ino = self.inodes.ensure(child_segments);
            all.push((child_ino, kind, name));
        }

        for (i, (entry_ino, kind, name)) in all.into_iter().enumerate().skip(offset as usize) {
            let next_offset = (i + 1) as i64;
            if reply.add(entry_ino, next_offset, kind, name) {
                break;
            }
        }
        reply.ok();
    }

    fn access(&mut self, _req: &Request<'_>, ino: u64, _mask: i32, reply: ReplyEmpty) {
        let path = match self.path_for(ino) {
            Ok((_, p)) => p,
            Err(e) => return reply.error(e.to_errno()),
        };

        match self.block(ops::access::access(self.graph.as_ref(), &path)) {
            Ok(()) => reply.ok(),
            Err(e) => reply.error(e.to_errno()),
        }
    }

    fn statfs(&mut self, _req: &Request<'_>, _ino: u64, reply: ReplyStatfs) {
        reply.statfs(4096, 2048, 2048, 0, 0, 512, 255, 512);
    }

    fn flush(&mut self, _req: &Request<'_>, _ino: u64, _fh: u64, _lock_owner: u64, reply: ReplyEmpty) {
        reply.ok();
    }

    fn release(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _flags: i32,
        _lock_owner: Option<u64>,
        _flush: bool,
        reply: ReplyEmpty,
    ) {
        reply.ok();
    }

    fn fsync(&mut self, _req: &Request<'_>, _ino: u64, _fh: u64, _datasync: bool, reply: ReplyEmpty) {
        reply.ok();
    }
}
