use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name looked up directly under a resolved project root.
pub const ROOT_CONFIG_FILE: &str = "resquire.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub root: String,
}

impl RootConfig {
    /// A missing file is an empty configuration; any other failure propagates.
    pub fn load(root_dir: &Path) -> anyhow::Result<Self> {
        let path = root_dir.join(ROOT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg = serde_json::from_str::<RootConfig>(&text)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    // An empty string counts as absent.
    pub fn subdirectory(&self) -> Option<&str> {
        if self.root.is_empty() {
            None
        } else {
            Some(self.root.as_str())
        }
    }
}
