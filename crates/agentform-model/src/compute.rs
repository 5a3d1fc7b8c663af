//! Compute unit declarations and environment binding.
//!
//! A compute unit is an independently invocable handler: a code reference,
//! an entry point, a timeout, a concurrency ceiling, and an environment
//! mapping. The unit executes no business logic here; the model only binds
//! the configuration the handler reads at invocation time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flags::FlagValue;

/// Reference to the deployable code bundle for a unit.
///
/// The bundle format and its packaging are an external concern; the model
/// forwards the location and, when staged, a content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    pub bundle: String,
    pub digest: Option<String>,
}

impl CodeRef {
    pub fn unstaged(bundle: &str) -> Self {
        Self {
            bundle: bundle.to_string(),
            digest: None,
        }
    }
}

/// Source of a single environment value, resolved during evaluation.
///
/// Declarations bind *sources*, not strings, so the dependency on a
/// resource or a flag is visible in the graph instead of being baked in
/// at some call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvValue {
    /// Fixed string, forwarded as-is.
    Literal(String),
    /// The qualified name of a declared resource, by logical id.
    ResourceName(String),
    /// A flag-derived value; always binds (empty string when unset).
    Flag(FlagValue),
}

/// A declared compute unit, pre-resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDecl {
    /// Logical id, unique within the blueprint (e.g. `simulate`).
    pub id: String,
    /// Handler entry point inside the bundle; opaque to the model.
    pub entry_point: String,
    pub code: CodeRef,
    pub timeout_secs: u32,
    /// Maximum concurrent invocations. Serialize-sensitive units are
    /// capped at 1 to avoid racing shared state.
    pub concurrency_limit: u32,
    pub environment: BTreeMap<String, EnvValue>,
}

impl UnitDecl {
    pub fn qualified_name(&self, namespace: &str) -> String {
        format!("{namespace}-{}", self.id)
    }
}

/// A compute unit with identity and environment fully bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    pub id: String,
    pub name: String,
    pub entry_point: String,
    pub code: CodeRef,
    pub timeout_secs: u32,
    pub concurrency_limit: u32,
    pub environment: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_names_are_namespace_qualified() {
        let unit = UnitDecl {
            id: "simulate".to_string(),
            entry_point: "handlers.simulate.handle".to_string(),
            code: CodeRef::unstaged("services/"),
            timeout_secs: 30,
            concurrency_limit: 1,
            environment: BTreeMap::new(),
        };
        assert_eq!(unit.qualified_name("agentform"), "agentform-simulate");
    }

    #[test]
    fn unstaged_code_ref_has_no_digest() {
        let code = CodeRef::unstaged("services/");
        assert_eq!(code.bundle, "services/");
        assert!(code.digest.is_none());
    }
}
