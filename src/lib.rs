// Purpose: Define crate surface for grouped and root-anchored require-path resolution.
// Inputs/Outputs: Re-exports the resolver pipeline, group expansion, and root-config components.
// Invariants: Public module boundaries should remain stable for host integrations.
// Gotchas: Hosts wire a Resolver in explicitly; nothing in this crate patches process-wide state.

pub mod config;
pub mod group;
pub mod host;
pub mod root;

pub use config::RootConfig;
pub use host::{Loaded, ModuleHost, Resolver};
pub use root::{MarkerRootFinder, RootFinder};
