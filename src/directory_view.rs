//! Conjunctive-intersection readdir algebra (§4.4).
//!
//! Given the group filter `G` named by a path's segments, a directory's
//! contents are the union of *refinement groups* (groups that would further
//! narrow the selection) and *resident files* (files connected to every
//! group in `G`). Both are single gateway calls; this module only adds the
//! fixed `.`/`..` entries and the ordering the FUSE layer expects.

use crate::error::Result;
use crate::graph::GraphGateway;

/// One readdir entry, distinguishing kind so [`crate::fs_ops`] can pick the
/// right `getattr`-equivalent mode bits without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Group(String),
    File(String),
}

/// Computes the §4.4 union for the group filter `groups`.
///
/// `groups` is the path's segments (empty at the root). Returns refinement
/// groups before resident files; callers prepend `.` and `..` themselves
/// since those are FUSE-level concerns, not graph-derived.
pub async fn list(graph: &dyn GraphGateway, groups: &[String]) -> Result<Vec<Entry>> {
    let refinement_groups = graph.list_groups_under_filter(groups).await?;
    let resident_files = graph.list_files_under_filter(groups).await?;

    let mut entries: Vec<Entry> = Vec::with_capacity(refinement_groups.len() + resident_files.len());
    entries.extend(refinement_groups.into_iter().map(Entry::Group));
    entries.extend(resident_files.into_iter().map(Entry::File));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::in_memory::InMemoryGateway;

    #[tokio::test]
    async fn empty_store_readdir_root_is_empty() {
        let gw = InMemoryGateway::new();
        let entries = list(&gw, &[]).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn root_lists_every_group_and_file() {
        let gw = InMemoryGateway::new();
        gw.create_group("a").await.unwrap();
        gw.create_file("x").await.unwrap();

        let entries = list(&gw, &[]).await.unwrap();
        assert!(entries.contains(&Entry::Group("a".to_string())));
        assert!(entries.contains(&Entry::File("x".to_string())));
    }

    #[tokio::test]
    async fn refinement_and_residency_scenario_from_spec() {
        // mkdir /a; mkdir /b; create /a/x; rename /a/x -> /b/x (now in both a, b)
        let gw = InMemoryGateway::new();
        gw.create_group("a").await.unwrap();
        gw.create_group("b").await.unwrap();
        gw.create_file("x").await.unwrap();
        gw.link_file_to_group("x", "a").await.unwrap();
        gw.link_file_to_group("x", "b").await.unwrap();

        let at_a = list(&gw, &["a".to_string()]).await.unwrap();
        assert!(at_a.contains(&Entry::Group("b".to_string())));
        assert!(at_a.contains(&Entry::File("x".to_string())));

        let at_ab = list(&gw, &["a".to_string(), "b".to_string()]).await.unwrap();
        assert_eq!(at_ab, vec![Entry::File("x".to_string())]);
    }
}
