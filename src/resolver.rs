//! Validates a parsed path against the graph and classifies its leaf
//! (§4.3). Pure orchestration over [`crate::path_codec`] and
//! [`crate::graph::GraphGateway`]; holds no state of its own.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::path_codec::{self, Segments};

/// What a resolved path's final segment denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// `segments` was `None`: the path is `/`.
    Root,
    /// The leaf name is a known group.
    Group(String),
    /// The leaf name is a known file.
    File(String),
    /// The leaf name is neither a group nor a file.
    Absent(String),
}

/// Validates and classifies paths against the current state of `graph`.
pub struct PathResolver<'g> {
    graph: &'g dyn GraphGateway,
}

impl<'g> PathResolver<'g> {
    pub fn new(graph: &'g dyn GraphGateway) -> Self {
        Self { graph }
    }

    /// Parses `path`, then validates it per §4.3: every prefix segment must
    /// be an existing group; if `require_leaf` is set the leaf must also
    /// exist (as either kind). Returns the parsed [`Segments`] on success.
    pub async fn validate(&self, path: &str, require_leaf: bool) -> Result<Segments> {
        let segments = path_codec::parse(path)?;

        let Some(segs) = &segments else {
            return Ok(segments);
        };

        let (prefix, leaf) = segs.split_at(segs.len() - 1);
        let leaf = &leaf[0];

        for name in prefix {
            if !self.graph.is_group(name).await? {
                return Err(GraphFsError::NotFound);
            }
        }

        if require_leaf {
            let exists = self.graph.is_group(leaf).await? || self.graph.is_file(leaf).await?;
            if !exists {
                return Err(GraphFsError::NotFound);
            }
        }

        Ok(segments)
    }

    /// Classifies the leaf of already-parsed `segments` (§4.3). Does not
    /// re-validate the prefix; call [`Self::validate`] first.
    pub async fn classify_leaf(&self, segments: &Segments) -> Result<Leaf> {
        let Some(segs) = segments else {
            return Ok(Leaf::Root);
        };

        let leaf = segs.last().expect("non-root segments are never empty");

        if self.graph.is_group(leaf).await? {
            return Ok(Leaf::Group(leaf.clone()));
        }
        if self.graph.is_file(leaf).await? {
            return Ok(Leaf::File(leaf.clone()));
        }
        Ok(Leaf::Absent(leaf.clone()))
    }
}
