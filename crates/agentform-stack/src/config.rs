//! Stack configuration parser (`agentform.toml`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use agentform_model::FlagContext;

/// Configuration for one synthesis of the platform stack.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below. Flags live here too, so a synthesis is fully described
/// by one file plus any command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Deployment namespace qualifying every realized identity.
    pub namespace: String,
    /// Fixture file the simulate and tools units load from the bucket.
    pub fixture: String,
    pub flags: FlagContext,
    pub code: CodeConfig,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            namespace: "agentform".to_string(),
            fixture: "baseline_path.json".to_string(),
            flags: FlagContext::default(),
            code: CodeConfig::default(),
        }
    }
}

/// Handler bundle location and packaging excludes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Directory holding the handler bundle.
    pub path: String,
    /// Patterns excluded from staging: a bare name matches any path
    /// component, `*.ext` matches file extensions.
    pub exclude: Vec<String>,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            path: "services".to_string(),
            exclude: vec![
                ".git".to_string(),
                ".DS_Store".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
                "*.pyc".to_string(),
                "target".to_string(),
                "tmp".to_string(),
            ],
        }
    }
}

impl StackConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StackConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` when given; otherwise read `agentform.toml` from the
    /// working directory if present, else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(explicit) => Self::from_file(explicit),
            None => {
                let conventional = Path::new("agentform.toml");
                if conventional.exists() {
                    Self::from_file(conventional)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = StackConfig::default();
        assert_eq!(config.namespace, "agentform");
        assert_eq!(config.fixture, "baseline_path.json");
        assert!(!config.flags.enable_planner);
        assert_eq!(config.code.path, "services");
        assert!(config.code.exclude.contains(&"__pycache__".to_string()));
    }

    #[test]
    fn parses_minimal_file() {
        let config: StackConfig = toml::from_str("namespace = \"prod\"").unwrap();
        assert_eq!(config.namespace, "prod");
        assert_eq!(config.fixture, "baseline_path.json");
    }

    #[test]
    fn parses_flag_section() {
        let config: StackConfig = toml::from_str(
            r#"
[flags]
enable-planner = true
model-id = "m1"
"#,
        )
        .unwrap();
        assert!(config.flags.enable_planner);
        assert_eq!(config.flags.model_id.as_deref(), Some("m1"));
    }

    #[test]
    fn parses_code_section() {
        let config: StackConfig = toml::from_str(
            r#"
[code]
path = "handlers"
exclude = [".git", "*.tmp"]
"#,
        )
        .unwrap();
        assert_eq!(config.code.path, "handlers");
        assert_eq!(config.code.exclude, vec![".git", "*.tmp"]);
    }
}
