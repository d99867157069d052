//! Bidirectional inode number <-> path-segment table (§4.7).
//!
//! `fuser`'s low-level contract addresses objects by 64-bit inode, not by
//! path: the kernel calls `lookup(parent_ino, name)` once and thereafter
//! refers to the result purely by number until it `forget`s it. This table
//! bridges that addressing scheme onto the group-path segments the rest of
//! the crate reasons about, the same role `state.rs` plays for the
//! `ShadowFS` reference filesystem, just keyed on graph segments instead of
//! a relative filesystem path.

use std::collections::HashMap;

/// Inode number reserved for the filesystem root (`segments = []`).
pub const ROOT_INO: u64 = 1;

#[derive(Default)]
pub struct InodeTable {
    next_ino: u64,
    by_ino: HashMap<u64, Vec<String>>,
    by_segments: HashMap<Vec<String>, u64>,
}

impl InodeTable {
    /// Creates a table containing only the root entry.
    pub fn new() -> Self {
        let mut by_ino = HashMap::new();
        let mut by_segments = HashMap::new();
        by_ino.insert(ROOT_INO, Vec::new());
        by_segments.insert(Vec::new(), ROOT_INO);
        Self { next_ino: ROOT_INO + 1, by_ino, by_segments }
    }

    /// Returns the segments recorded for `ino`, if any.
    pub fn segments(&self, ino: u64) -> Option<Vec<String>> {
        self.by_ino.get(&ino).cloned()
    }

    /// Returns the inode for `segments`, allocating a fresh one if this is
    /// the first time these segments have been observed. Repeated calls
    /// with the same segments return the same inode, which the kernel
    /// relies on for its attribute/entry cache.
    pub fn ensure(&mut self, segments: Vec<String>) -> u64 {
        if let Some(&ino) = self.by_segments.get(&segments) {
            return ino;
        }
        let ino = self.next_ino;
        self.next_ino += 1;
        self.by_ino.insert(ino, segments.clone());
        self.by_segments.insert(segments, ino);
        ino
    }

    /// Rewrites the entry for `ino` to `new_segments`, and every entry whose
    /// recorded segments had the old segments as a prefix (a renamed
    /// group's refined sub-paths move with it), mirroring
    /// `State::rename_entry` in the reference filesystem.
    pub fn rename(&mut self, ino: u64, new_segments: Vec<String>) {
        let Some(old_segments) = self.by_ino.get(&ino).cloned() else {
            return;
        };
        if old_segments == new_segments {
            return;
        }

        self.by_segments.remove(&old_segments);
        self.by_ino.insert(ino, new_segments.clone());
        self.by_segments.insert(new_segments.clone(), ino);

        let affected: Vec<(u64, Vec<String>)> = self
            .by_ino
            .iter()
            .filter_map(|(&child_ino, child_segments)| {
                if child_ino == ino {
                    return None;
                }
                let suffix = child_segments.strip_prefix(old_segments.as_slice())?;
                if suffix.is_empty() {
                    return None;
                }
                let mut updated = new_segments.clone();
                updated.extend_from_slice(suffix);
                Some((child_ino, updated))
            })
            .collect();

        for (child_ino, updated) in affected {
            if let Some(old) = self.by_ino.get(&child_ino).cloned() {
                self.by_segments.remove(&old);
            }
            self.by_segments.insert(updated.clone(), child_ino);
            self.by_ino.insert(child_ino, updated);
        }
    }

    /// Drops the entry for `segments`, and everything nested under it (for
    /// a removed group, its refined sub-paths), mirroring
    /// `State::remove_path`.
    pub fn remove(&mut self, segments: &[String]) {
        if segments.is_empty() {
            return;
        }
        let victims: Vec<(u64, Vec<String>)> = self
            .by_ino
            .iter()
            .filter(|(_, s)| s.starts_with(segments))
            .map(|(&ino, s)| (ino, s.clone()))
            .collect();
        for (ino, s) in victims {
            self.by_ino.remove(&ino);
            self.by_segments.remove(&s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_preallocated() {
        let table = InodeTable::new();
        assert_eq!(table.segments(ROOT_INO), Some(Vec::new()));
    }

    #[test]
    fn ensure_is_stable_across_repeated_lookups() {
        let mut table = InodeTable::new();
        let a = table.ensure(vec!["a".to_string()]);
        let a_again = table.ensure(vec!["a".to_string()]);
        assert_eq!(a, a_again);
    }

    #[test]
    fn rename_moves_descendants() {
        let mut table = InodeTable::new();
        let a = table.ensure(vec!["a".to_string()]);
        let ax = table.ensure(vec!["a".to_string(), "x".to_string()]);

        table.rename(a, vec!["b".to_string()]);

        assert_eq!(table.segments(a), Some(vec!["b".to_string()]));
        assert_eq!(table.segments(ax), Some(vec!["b".to_string(), "x".to_string()]));
        assert_eq!(table.ensure(vec!["b".to_string(), "x".to_string()]), ax);
    }

    #[test]
    fn remove_drops_descendants() {
        let mut table = InodeTable::new();
        let a = table.ensure(vec!["a".to_string()]);
        let ax = table.ensure(vec!["a".to_string(), "x".to_string()]);

        table.remove(&["a".to_string()]);

        assert_eq!(table.segments(a), None);
        assert_eq!(table.segments(ax), None);
    }
}
