//! Parses a slash-delimited absolute path into a sequence of group/file name
//! segments, with no reference to the graph — purely lexical.

use crate::error::{GraphFsError, Result};

/// A parsed path: `None` denotes the root, `Some(segments)` a non-empty
/// sequence of names where every segment but the last is (expected to be) a
/// group and the last may be a group or a file.
pub type Segments = Option<Vec<String>>;

/// Parses `path` into [`Segments`].
///
/// Normalizes redundant separators and strips a leading drive/volume prefix
/// (Windows-style `C:\...`) before splitting on `/`. `"/"` parses to `None`
/// (the root sentinel). A bare name with no separator parses to a single
/// segment. Anything else must be absolute (leading `/`) and non-empty;
/// malformed shapes fail with [`GraphFsError::Invalid`].
pub fn parse(path: &str) -> Result<Segments> {
    let path = strip_drive_prefix(path);
    if path.is_empty() {
        return Err(GraphFsError::Invalid);
    }
    let normalized = collapse_separators(&path);

    if normalized == "/" {
        return Ok(None);
    }

    if !normalized.contains('/') {
        if normalized.is_empty() {
            return Err(GraphFsError::Invalid);
        }
        return Ok(Some(vec![normalized]));
    }

    let parts: Vec<&str> = normalized.split('/').collect();
    if parts.len() < 2 || !parts[0].is_empty() {
        return Err(GraphFsError::Invalid);
    }

    let segments: Vec<String> = parts[1..].iter().map(|s| s.to_string()).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(GraphFsError::Invalid);
    }

    Ok(Some(segments))
}

/// Strips a `C:`-style drive/volume prefix, if present, and leaves the rest
/// of the path untouched.
fn strip_drive_prefix(path: &str) -> String {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        path[2..].to_string()
    } else {
        path.to_string()
    }
}

/// Collapses any run of `\` or repeated `/` into a single `/`.
fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_sep = false;
    for ch in path.chars() {
        let is_sep = ch == '/' || ch == '\\';
        if is_sep {
            if !last_was_sep {
                out.push('/');
            }
            last_was_sep = true;
        } else {
            out.push(ch);
            last_was_sep = false;
        }
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Joins parsed [`Segments`] back into an absolute path string, mainly for
/// logging and for constructing graph queries that need the full joined key.
pub fn join(segments: &[String]) -> String {
    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_parses_to_none() {
        assert_eq!(parse("/").unwrap(), None);
    }

    #[test]
    fn single_segment_without_separator() {
        assert_eq!(parse("a").unwrap(), Some(vec!["a".to_string()]));
    }

    #[test]
    fn absolute_multi_segment_path() {
        assert_eq!(
            parse("/a/b/c").unwrap(),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(
            parse("//a//b/").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn strips_drive_prefix() {
        assert_eq!(parse("C:/a/b").unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn relative_path_without_leading_slash_is_invalid() {
        assert!(parse("a/b").is_err());
    }

    #[test]
    fn empty_string_is_invalid() {
        assert!(parse("").is_err());
    }

    #[test]
    fn join_round_trips_with_parse() {
        let segments = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parse(&join(&segments)).unwrap(), Some(segments));
    }
}
