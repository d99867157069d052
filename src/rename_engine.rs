//! Rename/move decision matrix (§4.5).
//!
//! `old` and `new` arrive as already-parsed [`crate::path_codec::Segments`];
//! the caller ([`crate::fs_ops`]) is responsible for running both through
//! [`crate::resolver::PathResolver::validate`] first (`old` with
//! `require_leaf = true`, `new` with `require_leaf = false`). This module
//! only decides *which* graph edits a given `(old, new)` pair implies and
//! issues them in the order the specification lists, detaches before
//! attaches.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::path_codec::Segments;
use crate::resolver::Leaf;

/// Applies the rename matrix for `old -> new` against `graph`.
///
/// `old_leaf` and `new_leaf` are the already-classified leaves of `old` and
/// `new` respectively (classifying `new`'s leaf only requires checking
/// existence, since a rename target's leaf need not already exist).
pub async fn rename(
    graph: &dyn GraphGateway,
    old: &Segments,
    new: &Segments,
    old_leaf: &Leaf,
    new_leaf: &Leaf,
) -> Result<()> {
    let Some(old_segs) = old else {
        return Err(GraphFsError::Permission);
    };
    let Some(new_segs) = new else {
        // Every file/group already lives in the root selection; no-op.
        return Ok(());
    };

    let (old_prefix, old_name) = old_segs.split_at(old_segs.len() - 1);
    let old_name = &old_name[0];
    let (new_prefix, new_name) = new_segs.split_at(new_segs.len() - 1);
    let new_name = &new_name[0];

    if old_name == new_name {
        return move_same_name(graph, old_leaf, old_prefix, new_prefix, old_name).await;
    }

    match (old_leaf, new_leaf) {
        (Leaf::Group(_), Leaf::File(_)) => Err(GraphFsError::Permission),
        (Leaf::Group(_), Leaf::Group(_)) => Err(GraphFsError::Permission),
        (Leaf::Group(_), Leaf::Absent(_)) => {
            // Edges follow the rename automatically; the destination prefix
            // is deliberately not applied (Open Question O1).
            graph.rename_group(old_name, new_name).await
        }
        (Leaf::File(_), Leaf::File(_)) => {
            rename_file_onto_file(graph, old_prefix, old_name, new_name).await
        }
        (Leaf::File(_), Leaf::Group(_)) => Err(GraphFsError::Permission),
        (Leaf::File(_), Leaf::Absent(_)) => {
            rename_file_onto_absent(graph, old_prefix, old_name, new_prefix, new_name).await
        }
        (Leaf::Root, _) | (Leaf::Absent(_), _) => {
            Err(GraphFsError::Internal("rename: old leaf unresolved".to_string()))
        }
    }
}

/// `O[-1] == N[-1]`: move the entity into the groups named by `N[:-1]`.
async fn move_same_name(
    graph: &dyn GraphGateway,
    old_leaf: &Leaf,
    old_prefix: &[String],
    new_prefix: &[String],
    name: &str,
) -> Result<()> {
    match old_leaf {
        Leaf::Group(_) => Err(GraphFsError::Permission),
        Leaf::File(_) => {
            for group in old_prefix {
                graph.unlink_file_from_group(name, group).await?;
            }
            for group in new_prefix {
                graph.link_file_to_group(name, group).await?;
            }
            Ok(())
        }
        Leaf::Root | Leaf::Absent(_) => {
            Err(GraphFsError::Internal("rename: old leaf unresolved".to_string()))
        }
    }
}

/// file -> existing file: copy content, delete the source, re-attach the
/// destination name to the source's prefix groups.
async fn rename_file_onto_file(
    graph: &dyn GraphGateway,
    old_prefix: &[String],
    old_name: &str,
    new_name: &str,
) -> Result<()> {
    let value = graph.read_file_value(old_name).await?;
    graph.write_file_value(new_name, &value.unwrap_or_default()).await?;
    graph.delete_file(old_name).await?;
    for group in old_prefix {
        graph.link_file_to_group(new_name, group).await?;
    }
    Ok(())
}

/// file -> absent name: plain rename, re-pointing group membership from the
/// old prefix to the new one.
async fn rename_file_onto_absent(
    graph: &dyn GraphGateway,
    old_prefix: &[String],
    old_name: &str,
    new_prefix: &[String],
    new_name: &str,
) -> Result<()> {
    graph.rename_file(old_name, new_name).await?;
    for group in old_prefix {
        graph.unlink_file_from_group(new_name, group).await?;
    }
    for group in new_prefix {
        graph.link_file_to_group(new_name, group).await?;
    }
    Ok(())
}
