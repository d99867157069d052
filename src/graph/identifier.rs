//! Identifier validation shared by every [`super::GraphGateway`] implementation.

use crate::error::{GraphFsError, Result};

/// Rejects identifiers that are empty or contain a quote or backslash.
///
/// Applied uniformly to every `name`/`file`/`group` argument before a query
/// is issued, regardless of backend: on [`super::neo4j::Neo4jGateway`] the
/// actual injection defense is Bolt parameter binding (values never reach
/// the query text), but the character check is specified independently of
/// that and also protects [`super::in_memory::InMemoryGateway`], which has
/// no parameterization layer to fall back on.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\'') || name.contains('"') || name.contains('\\') {
        return Err(GraphFsError::Invalid);
    }
    Ok(())
}
