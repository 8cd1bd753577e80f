//! Path arithmetic for the rename/move form.
//!
//! Everything here is pure: the same inputs always resolve to the same
//! paths and classification. The form labels, the "New location" caption
//! and the post-success listing update all read from [`ResolvedPaths`], so
//! they can never disagree about whether an operation was a move.

use crate::types::{OperationClassification, OperationMode, RenameRequest};

/// Prefix the panel shows in front of server-relative paths
pub const CONTAINER_ROOT: &str = "/home/container/";

/// Paths and classification computed for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub absolute_source: String,
    pub absolute_target: String,
    pub classification: OperationClassification,
    /// `absolute_target` with leading `../` and `/` runs removed. Display only.
    pub display_target: String,
}

impl ResolvedPaths {
    /// Build the request sent to the rename operation
    pub fn request(&self) -> RenameRequest {
        RenameRequest {
            rename_from: self.absolute_source.clone(),
            rename_to: self.absolute_target.clone(),
        }
    }

    /// Location as shown to the user, e.g. `/home/container/sub/b.txt`
    pub fn display_location(&self) -> String {
        format!("{}{}", CONTAINER_ROOT, self.display_target)
    }
}

pub struct PathResolver;

impl PathResolver {
    /// Resolve source and target paths of a rename in `directory`
    ///
    /// `target_name` is not validated here; an empty name resolves to the
    /// directory itself.
    pub fn resolve(
        directory: &str,
        source_name: &str,
        target_name: &str,
        mode: OperationMode,
    ) -> ResolvedPaths {
        let absolute_source = join(directory, source_name);
        let absolute_target = join(directory, target_name);
        let display_target = strip_leading_traversal(&absolute_target).to_string();

        ResolvedPaths {
            absolute_source,
            absolute_target,
            classification: classify(mode, target_name),
            display_target,
        }
    }
}

/// Number of `/`-separated segments in a user-entered name
pub fn segment_count(name: &str) -> usize {
    name.split('/').count()
}

/// `Move` when the caller asked for move terminology or the target name
/// points into another directory, `Rename` otherwise
pub fn classify(mode: OperationMode, target_name: &str) -> OperationClassification {
    if mode.is_move() || segment_count(target_name) > 1 {
        OperationClassification::Move
    } else {
        OperationClassification::Rename
    }
}

/// Join two path fragments with `/` and normalize the result lexically
pub fn join(directory: &str, name: &str) -> String {
    let joined = [directory, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return ".".to_string();
    }

    normalize(&joined)
}

/// Collapse repeated separators, drop `.` and resolve `..` against the
/// preceding segment. `..` above the root of an absolute path is dropped.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing_slash = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, '/');
    }
    if normalized.is_empty() {
        normalized.push('.');
    }
    if trailing_slash && !normalized.ends_with('/') {
        normalized.push('/');
    }

    normalized
}

/// Remove any leading run of `../` and `/` from a path
///
/// Cosmetic only. The request still carries the unstripped path.
pub fn strip_leading_traversal(path: &str) -> &str {
    let mut rest = path;
    loop {
        if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            return rest;
        }
    }
}
