// Purpose: Compose group expansion and root anchoring into the host-facing require pipeline.
// Inputs/Outputs: Takes request strings plus the requesting file; yields host modules, one or many.
// Invariants: Member evaluation is strict left-to-right, depth-first; each group flattens one level.
// Gotchas: A failing member aborts the whole expansion and discards earlier member results.

use anyhow::bail;
use std::path::{Path, PathBuf};

use crate::group;
use crate::root::{self, MarkerRootFinder, RootFinder};

/// Host side of the interception point: the native single-module load, used
/// for every request the resolver leaves alone or has rewritten.
pub trait ModuleHost {
    type Module;

    fn load(&mut self, request: &str, requesting_file: &Path) -> anyhow::Result<Self::Module>;
}

/// Return shape of an intercepted require: grouped requests produce an
/// ordered flat list, everything else a single module.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<M> {
    One(M),
    Many(Vec<M>),
}

impl<M> Loaded<M> {
    pub fn into_vec(self) -> Vec<M> {
        match self {
            Loaded::One(module) => vec![module],
            Loaded::Many(modules) => modules,
        }
    }
}

/// The resolution pipeline a host consults before its default behavior.
/// Constructed explicitly and wired into the host's loading entry point.
pub struct Resolver {
    root_finder: Box<dyn RootFinder>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_root_finder(MarkerRootFinder::default())
    }

    /// Swaps in a custom project-root policy.
    pub fn with_root_finder(finder: impl RootFinder + 'static) -> Self {
        Self {
            root_finder: Box::new(finder),
        }
    }

    // Precondition: `requesting_file` is absolute and `request` is non-empty.
    // Postcondition: Grouped requests yield `Loaded::Many` in source order; all others `Loaded::One`.
    // Side effects: May read root markers and resquire.json; loading is delegated to the host.
    pub fn require<H: ModuleHost>(
        &self,
        host: &mut H,
        request: &str,
        requesting_file: &Path,
    ) -> anyhow::Result<Loaded<H::Module>> {
        if request.is_empty() {
            bail!("empty require path");
        }

        if let Some(members) = group::expand_group(request)? {
            trace(&format!("expand {} into {} members", request, members.len()));
            let mut modules = Vec::with_capacity(members.len());
            for member in &members {
                // A member may itself carry a nested group or an anchor, so
                // it goes through the full pipeline again. Sub-lists splice
                // into the parent sequence rather than nesting.
                match self.require(host, member, requesting_file)? {
                    Loaded::One(module) => modules.push(module),
                    Loaded::Many(nested) => modules.extend(nested),
                }
            }
            return Ok(Loaded::Many(modules));
        }

        let module = match self.resolve_anchor(request, requesting_file)? {
            Some(resolved) => host.load(&resolved.to_string_lossy(), requesting_file)?,
            None => host.load(request, requesting_file)?,
        };
        Ok(Loaded::One(module))
    }

    /// Filename-resolution half of the pipeline, for hosts that hook path
    /// resolution separately from loading. `None` means the host's normal
    /// resolution applies unchanged.
    pub fn resolve_anchor(
        &self,
        request: &str,
        requesting_file: &Path,
    ) -> anyhow::Result<Option<PathBuf>> {
        let resolved = root::resolve_anchor(self.root_finder.as_ref(), request, requesting_file)?;
        if let Some(path) = &resolved {
            trace(&format!("anchor {} resolved to {}", request, path.display()));
        }
        Ok(resolved)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn trace_enabled() -> bool {
    std::env::var("RESQUIRE_TRACE")
        .ok()
        .as_deref()
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn trace(msg: &str) {
    if trace_enabled() {
        eprintln!("[resquire] {}", msg);
    }
}
