//! graphfs --- a FUSE filesystem that projects a labeled-property graph of
//! tag-like "groups" and "files" as a navigable directory tree.
//!
//! Unlike a conventional filesystem, a file here may belong to arbitrarily
//! many groups; any path of group names acts as a conjunctive filter over
//! the files (and further refining groups) connected to every group on that
//! path. See `SPEC_FULL.md` for the full component design; this crate's
//! module layout follows it one-to-one:
//!
//! - [`path_codec`] parses a slash-delimited path into name segments.
//! - [`graph`] is the typed boundary to the graph store (Neo4j or in-memory).
//! - [`resolver`] validates a path against the graph and classifies its leaf.
//! - [`directory_view`] computes the conjunctive-intersection readdir union.
//! - [`rename_engine`] implements the rename/move decision matrix.
//! - [`ops`] composes the above into one function per FUSE operation.
//! - [`fs_ops`] bridges `ops` to `fuser`'s inode-addressed `Filesystem` trait.
//! - [`inode_table`] is the inode <-> path-segment bridge `fs_ops` needs.
//! - [`config`] and [`cli`] assemble a runnable `graphfs-mount` invocation.

pub mod cli;
pub mod config;
pub mod directory_view;
pub mod error;
pub mod fs_ops;
pub mod graph;
pub mod inode_table;
pub mod ops;
pub mod path_codec;
pub mod rename_engine;
pub mod resolver;
