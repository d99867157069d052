//! In-process reference implementation of [`super::GraphGateway`].
//!
//! Plays the role the reference implementation's `ShadowFS` plays for the
//! NFS teacher crate this filesystem is built from: a fully functional
//! alternate backend with no external dependency, good enough to drive real
//! control flow in tests and in `--backend memory` demos, without requiring
//! a live Neo4j server.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{GraphFsError, Result};

use super::{validate_identifier, GraphGateway};

#[derive(Default)]
struct State {
    groups: HashSet<String>,
    files: HashMap<String, Option<Vec<u8>>>,
    /// file name -> set of group names it is linked to.
    memberships: HashMap<String, HashSet<String>>,
}

/// A graph held entirely in memory, guarded by a single mutex.
///
/// Matches the single-threaded cooperative scheduling model of §5: there is
/// never more than one FUSE callback in flight, so the mutex is never
/// contended in practice; it exists to satisfy `Send + Sync` rather than to
/// arbitrate real concurrency.
#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
}

impl InMemoryGateway {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphGateway for InMemoryGateway {
    async fn is_group(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        Ok(self.state.lock().await.groups.contains(name))
    }

    async fn is_file(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        Ok(self.state.lock().await.files.contains_key(name))
    }

    async fn create_group(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        state.groups.insert(name.to_string());
        Ok(())
    }

    async fn create_file(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        state.files.insert(name.to_string(), None);
        state.memberships.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn link_file_to_group(&self, file: &str, group: &str) -> Result<()> {
        validate_identifier(file)?;
        validate_identifier(group)?;
        let mut state = self.state.lock().await;
        state.memberships.entry(file.to_string()).or_default().insert(group.to_string());
        Ok(())
    }

    async fn unlink_file_from_group(&self, file: &str, group: &str) -> Result<()> {
        validate_identifier(file)?;
        validate_identifier(group)?;
        let mut state = self.state.lock().await;
        if let Some(groups) = state.memberships.get_mut(file) {
            groups.remove(group);
        }
        Ok(())
    }

    async fn delete_group(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        state.groups.remove(name);
        Ok(())
    }

    async fn delete_file(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        state.files.remove(name);
        state.memberships.remove(name);
        Ok(())
    }

    async fn rename_group(&self, old: &str, new: &str) -> Result<()> {
        validate_identifier(old)?;
        validate_identifier(new)?;
        let mut state = self.state.lock().await;
        if !state.groups.remove(old) {
            return Err(GraphFsError::Internal(format!("rename_group: {old} does not exist")));
        }
        state.groups.insert(new.to_string());
        for groups in state.memberships.values_mut() {
            if groups.remove(old) {
                groups.insert(new.to_string());
            }
        }
        Ok(())
    }

    async fn rename_file(&self, old: &str, new: &str) -> Result<()> {
        validate_identifier(old)?;
        validate_identifier(new)?;
        let mut state = self.state.lock().await;
        let value = state
            .files
            .remove(old)
            .ok_or_else(|| GraphFsError::Internal(format!("rename_file: {old} does not exist")))?;
        state.files.insert(new.to_string(), value);
        if let Some(groups) = state.memberships.remove(old) {
            state.memberships.insert(new.to_string(), groups);
        }
        Ok(())
    }

    async fn read_file_value(&self, name: &str) -> Result<Option<Vec<u8>>> {
        validate_identifier(name)?;
        let state = self.state.lock().await;
        Ok(state.files.get(name).cloned().flatten())
    }

    async fn write_file_value(&self, name: &str, value: &[u8]) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        let slot = state
            .files
            .get_mut(name)
            .ok_or_else(|| GraphFsError::Internal(format!("write_file_value: {name} does not exist")))?;
        *slot = Some(value.to_vec());
        Ok(())
    }

    async fn clear_file_value(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let mut state = self.state.lock().await;
        let slot = state
            .files
            .get_mut(name)
            .ok_or_else(|| GraphFsError::Internal(format!("clear_file_value: {name} does not exist")))?;
        *slot = None;
        Ok(())
    }

    async fn list_groups_under_filter(&self, groups: &[String]) -> Result<Vec<String>> {
        for g in groups {
            validate_identifier(g)?;
        }
        let state = self.state.lock().await;

        if groups.is_empty() {
            return Ok(state.groups.iter().cloned().collect());
        }

        let filter: HashSet<&str> = groups.iter().map(String::as_str).collect();
        let mut refinements: HashSet<String> = HashSet::new();
        for (_file, memberships) in state.memberships.iter() {
            if filter.iter().all(|g| memberships.contains(*g)) {
                for g in memberships.iter() {
                    if !filter.contains(g.as_str()) {
                        refinements.insert(g.clone());
                    }
                }
            }
        }
        Ok(refinements.into_iter().collect())
    }

    async fn list_files_under_filter(&self, groups: &[String]) -> Result<Vec<String>> {
        for g in groups {
            validate_identifier(g)?;
        }
        let state = self.state.lock().await;

        if groups.is_empty() {
            return Ok(state.files.keys().cloned().collect());
        }

        let mut matches = Vec::new();
        for (file, memberships) in state.memberships.iter() {
            if groups.iter().all(|g| memberships.contains(g)) {
                matches.push(file.clone());
            }
        }
        Ok(matches)
    }

    async fn group_has_files(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        let state = self.state.lock().await;
        Ok(state.memberships.values().any(|groups| groups.contains(name)))
    }
}
