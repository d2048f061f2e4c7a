//! Resolves an ingest path safely under a project root: no `..` traversal,
//! no absolute escape.

use crate::error::{Result, ToolError};
use std::path::{Path, PathBuf};

pub fn resolve_under_root(root: &Path, requested: &str) -> Result<PathBuf> {
    if requested.is_empty() {
        return Err(ToolError::InvalidPath("empty path".to_string()));
    }

    let requested_path = Path::new(requested);
    if requested_path.is_absolute() {
        return Err(ToolError::InvalidPath(requested.to_string()));
    }
    if requested_path.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(ToolError::InvalidPath(requested.to_string()));
    }

    let joined = root.join(requested_path);
    let root_canon = root.canonicalize().map_err(|e| ToolError::InvalidPath(e.to_string()))?;
    let joined_canon = joined.canonicalize().map_err(|e| ToolError::InvalidPath(e.to_string()))?;

    if !joined_canon.starts_with(&root_canon) {
        return Err(ToolError::InvalidPath(requested.to_string()));
    }

    Ok(joined_canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_dir_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_under_root(dir.path(), "../etc/passwd");
        assert!(matches!(result, Err(ToolError::InvalidPath(_))));
    }

    #[test]
    fn rejects_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_under_root(dir.path(), "/etc/passwd");
        assert!(matches!(result, Err(ToolError::InvalidPath(_))));
    }

    #[test]
    fn accepts_relative_path_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.txt"), b"hello").unwrap();
        let resolved = resolve_under_root(dir.path(), "data.txt").unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap().join("data.txt"));
    }
}
