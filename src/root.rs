// Purpose: Resolve root-anchored require paths against the nearest project root.
// Inputs/Outputs: Takes a request plus the requesting file's path; yields an absolute file path.
// Invariants: Resolution is purely lexical; no path produced here is checked for existence.
// Gotchas: `..` segments clamp at the filesystem top; an explicit extension is never replaced.

use anyhow::bail;
use std::path::{Component, Path, PathBuf};

use crate::config::{ROOT_CONFIG_FILE, RootConfig};

/// Leading character that switches a request to root-relative resolution.
pub const ANCHOR: char = '^';

/// Extension appended when a resolved path carries none.
pub const DEFAULT_EXTENSION: &str = "js";

/// Locates the nearest ancestor directory considered a project root. Must be
/// total: some directory comes back even with no marker anywhere up the tree.
pub trait RootFinder {
    fn find_root(&self, start_dir: &Path) -> PathBuf;
}

/// Nearest ancestor containing one of the marker files, falling back to the
/// filesystem top.
pub struct MarkerRootFinder {
    markers: Vec<String>,
}

impl MarkerRootFinder {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for MarkerRootFinder {
    fn default() -> Self {
        Self::new(["package.json", ROOT_CONFIG_FILE])
    }
}

impl RootFinder for MarkerRootFinder {
    fn find_root(&self, start_dir: &Path) -> PathBuf {
        let mut cur = start_dir.to_path_buf();
        loop {
            if self.markers.iter().any(|m| cur.join(m).exists()) {
                return cur;
            }
            if !cur.pop() {
                return cur;
            }
        }
    }
}

/// Rewrites an anchored request into an absolute file path; `None` when the
/// request does not start with the anchor.
pub fn resolve_anchor(
    finder: &dyn RootFinder,
    request: &str,
    requesting_file: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(stripped) = request.strip_prefix(ANCHOR) else {
        return Ok(None);
    };
    if !requesting_file.is_absolute() {
        bail!(
            "requesting file must be an absolute path: {}",
            requesting_file.display()
        );
    }

    let from_dir = match requesting_file.parent() {
        Some(dir) => dir.to_path_buf(),
        None => requesting_file.to_path_buf(),
    };
    let root = finder.find_root(&from_dir);

    let config = RootConfig::load(&root)?;
    let base = match config.subdirectory() {
        Some(sub) => root.join(sub),
        None => root,
    };

    let mut resolved = resolve_segments(&base, stripped);
    if resolved.extension().is_none() {
        resolved.set_extension(DEFAULT_EXTENSION);
    }
    Ok(Some(resolved))
}

// `.` and empty segments are skipped, `..` walks upward without dropping
// below the filesystem top, a leading `/` restarts from the filesystem root.
fn resolve_segments(base: &Path, request: &str) -> PathBuf {
    let mut out = if request.starts_with('/') {
        filesystem_top(base)
    } else {
        base.to_path_buf()
    };
    for segment in request.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            _ => out.push(segment),
        }
    }
    out
}

fn filesystem_top(base: &Path) -> PathBuf {
    base.components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}
