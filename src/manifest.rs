//! Manifest of declared resource instances
//!
//! ```toml
//! [[resources]]
//! name = "web01"
//! kind = "host"
//!
//! [resources.attributes]
//! host = "web01"
//! groups = ["2"]
//! ```
//!
//! The same shape is accepted as JSON. Instances are independent; their
//! order only matters when running with a single job.

use crate::resource;
use anyhow::{Context, Result, bail};
use declarative::AttributeSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<Declared>,
}

/// One declared resource instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declared {
    /// Local name the instance is tracked under
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub attributes: AttributeSet,
}

impl Manifest {
    /// Load a manifest; `.toml` files are TOML, anything else JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Could not read manifest {}", path.display()))?;
        let manifest = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("toml")) {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
        .with_context(|| format!("Invalid manifest {}", path.display()))?;

        log::debug!("Loaded {} resources from {}", manifest.resources.len(), path.display());
        Ok(manifest)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Names must be unique and non-empty, kinds must exist
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();
        for (i, declared) in self.resources.iter().enumerate() {
            if declared.name.trim().is_empty() {
                problems.push(format!("resources[{i}]: name is empty"));
            } else if !seen.insert(declared.name.as_str()) {
                problems.push(format!("resources[{i}]: duplicate name \"{}\"", declared.name));
            }
            if !resource::kinds().any(|k| k == declared.kind) {
                problems.push(format!("resources[{i}]: unknown kind \"{}\"", declared.kind));
            }
        }
        if !problems.is_empty() {
            bail!("{}", problems.join("\n"));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Declared> {
        self.resources.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::AttributeValue;

    #[test]
    fn test_toml_manifest() {
        let manifest = Manifest::from_toml(
            r#"
[[resources]]
name = "web01"
kind = "host"

[resources.attributes]
host = "web01"
groups = ["2"]
monitored = true

[[resources.attributes.interfaces]]
ip = "10.0.0.5"
"#,
        )
        .unwrap();

        let web01 = manifest.get("web01").unwrap();
        assert_eq!(web01.kind, "host");
        assert_eq!(web01.attributes.get("monitored"), Some(&AttributeValue::Bool(true)));
        let interfaces = web01.attributes.get("interfaces").and_then(AttributeValue::elements).unwrap();
        assert_eq!(interfaces[0].as_map().and_then(|i| i.get_str("ip")), Some("10.0.0.5"));
    }

    #[test]
    fn test_json_manifest() {
        let manifest = Manifest::from_json(
            r#"{"resources": [{"name": "hk", "kind": "housekeeping_settings", "attributes": {"history": "90d"}}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.resources.len(), 1);
        assert_eq!(manifest.resources[0].attributes.get_str("history"), Some("90d"));
    }

    #[test]
    fn test_every_problem_reported() {
        let err = Manifest::from_json(
            r#"{"resources": [
                {"name": "a", "kind": "host"},
                {"name": "a", "kind": "host"},
                {"name": "", "kind": "action"}
            ]}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("duplicate name \"a\""), "{err}");
        assert!(err.contains("resources[2]: name is empty"), "{err}");
        assert!(err.contains("unknown kind \"action\""), "{err}");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, "[[resources]]\nname = \"ops\"\nkind = \"user_group\"\n").unwrap();
        assert_eq!(Manifest::load(&path).unwrap().resources[0].kind, "user_group");

        let path = dir.path().join("manifest.json");
        fs::write(&path, "not json").unwrap();
        assert!(Manifest::load(&path).unwrap_err().to_string().contains("Invalid manifest"));
    }
}
