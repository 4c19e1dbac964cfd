use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use declarative::{AttributeSet, Lifecycle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// State Structures
// ============================================================================

/// Local declarative state: every tracked resource instance by name
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StateFile {
    #[serde(default)]
    pub resources: BTreeMap<String, TrackedResource>,

    /// Last time the state was updated
    pub last_updated: DateTime<Utc>,

    #[serde(skip)]
    path: PathBuf,
}

/// One resource instance as last seen
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackedResource {
    pub kind: String,

    /// Remote id; empty until a create succeeds
    #[serde(default)]
    pub id: String,

    pub lifecycle: Lifecycle,

    /// Attributes as declared in the manifest at the last apply
    #[serde(default)]
    pub desired: AttributeSet,

    /// Attributes as last read from the API
    #[serde(default)]
    pub attributes: AttributeSet,

    pub updated_at: DateTime<Utc>,
}

impl TrackedResource {
    pub fn new(kind: &str, lifecycle: Lifecycle) -> Self {
        Self {
            kind: kind.to_string(),
            id: String::new(),
            lifecycle,
            desired: AttributeSet::new(),
            attributes: AttributeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// Whether applying `desired` again would change nothing
    pub fn is_up_to_date(&self, kind: &str, desired: &AttributeSet) -> bool {
        self.kind == kind && self.lifecycle == Lifecycle::Created && self.desired.equivalent(desired)
    }
}

// ============================================================================
// StateFile Implementation
// ============================================================================

impl StateFile {
    /// Empty state that will be saved at `path`
    pub fn empty(path: &Path) -> Self {
        Self {
            resources: BTreeMap::new(),
            last_updated: Utc::now(),
            path: path.to_path_buf(),
        }
    }

    /// Load state from disk, or return empty state if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("State file {} does not exist, starting empty", path.display());
            return Ok(Self::empty(path));
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        let mut state: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;
        state.path = path.to_path_buf();

        log::debug!("Loaded {} tracked resources from {}", state.resources.len(), path.display());
        Ok(state)
    }

    /// Save state to disk
    ///
    /// Writes a sibling temp file first so an interrupted save never leaves
    /// a truncated state file behind.
    pub fn save(&mut self) -> Result<()> {
        self.last_updated = Utc::now();
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(&self).context("Failed to serialize state to JSON")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).with_context(|| format!("Failed to write state file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace state file: {}", self.path.display()))?;

        log::debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&TrackedResource> {
        self.resources.get(name)
    }

    /// Record `tracked` under `name`, stamping the update time
    pub fn put(&mut self, name: &str, mut tracked: TrackedResource) {
        tracked.updated_at = Utc::now();
        self.resources.insert(name.to_string(), tracked);
    }

    pub fn remove(&mut self, name: &str) -> Option<TrackedResource> {
        self.resources.remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
