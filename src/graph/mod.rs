//! Defines the [`GraphGateway`] interface --- the typed boundary between this
//! filesystem and the labeled-property graph that backs it.
//!
//! Every method is a single query against the store. Two implementations are
//! provided: [`neo4j::Neo4jGateway`], which speaks Cypher over Bolt to a real
//! Neo4j server, and [`in_memory::InMemoryGateway`], a dependency-free
//! reference implementation used by the test suite and by `--backend memory`
//! for offline demos.

mod identifier;
pub mod in_memory;
pub mod neo4j;

pub use identifier::validate_identifier;

use async_trait::async_trait;

use crate::error::Result;

/// Typed wrapper over the graph store (§4.2 of the specification).
///
/// Implementors validate every `name`/`file`/`group` argument with
/// [`validate_identifier`] before issuing a query and fail with
/// [`crate::error::GraphFsError::Invalid`] if validation fails, so callers
/// never need to re-validate.
#[async_trait]
pub trait GraphGateway: Send + Sync {
    /// `true` iff a group named `name` exists.
    async fn is_group(&self, name: &str) -> Result<bool>;

    /// `true` iff a file named `name` exists.
    async fn is_file(&self, name: &str) -> Result<bool>;

    /// Inserts a new group. The caller has already checked non-existence.
    async fn create_group(&self, name: &str) -> Result<()>;

    /// Inserts a new file node with no `value`. The caller has already
    /// checked non-existence.
    async fn create_file(&self, name: &str) -> Result<()>;

    /// Creates one `isInGroup` edge from `file` to `group`. Not required to
    /// be idempotent; the caller ensures no duplicate edge is requested.
    async fn link_file_to_group(&self, file: &str, group: &str) -> Result<()>;

    /// Deletes the `isInGroup` edge from `file` to `group`, if present.
    async fn unlink_file_from_group(&self, file: &str, group: &str) -> Result<()>;

    /// Deletes the group node. The caller has verified it has no files.
    async fn delete_group(&self, name: &str) -> Result<()>;

    /// Deletes the file node and all incident edges, atomically.
    async fn delete_file(&self, name: &str) -> Result<()>;

    /// Renames a group. The caller has verified the new name is unused.
    async fn rename_group(&self, old: &str, new: &str) -> Result<()>;

    /// Renames a file. The caller has verified the new name is unused.
    async fn rename_file(&self, old: &str, new: &str) -> Result<()>;

    /// Returns the file's `value` property, or `None` if it was never set.
    async fn read_file_value(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// Sets the file's `value` property to exactly `value`, replacing any
    /// prior content.
    async fn write_file_value(&self, name: &str, value: &[u8]) -> Result<()>;

    /// Clears the file's `value` property back to absent (`None`), as
    /// opposed to setting it to a zero-length byte string.
    async fn clear_file_value(&self, name: &str) -> Result<()>;

    /// Every group that narrows the selection named by `groups` (§4.4a).
    /// When `groups` is empty, returns every group in the store.
    async fn list_groups_under_filter(&self, groups: &[String]) -> Result<Vec<String>>;

    /// Every file connected to every group in `groups` (§4.4b). When
    /// `groups` is empty, returns every file in the store.
    async fn list_files_under_filter(&self, groups: &[String]) -> Result<Vec<String>>;

    /// `true` iff at least one file is connected to the group `name`.
    async fn group_has_files(&self, name: &str) -> Result<bool>;
}
