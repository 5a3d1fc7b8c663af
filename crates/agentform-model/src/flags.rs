//! Build-time feature flag context.
//!
//! Flags are fixed inputs to one evaluation pass. They are passed
//! explicitly into the blueprint builder and the evaluator; nothing reads
//! them ambiently, so the same inputs always produce the same manifest.

use serde::{Deserialize, Serialize};

/// Feature flags for a single evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FlagContext {
    /// Enable the external model planner on the simulate unit.
    pub enable_planner: bool,
    /// Identifier of the external model the planner invokes.
    pub model_id: Option<String>,
}

impl FlagContext {
    /// Value forwarded for the planner flag: `"1"` when set, `"0"` otherwise.
    pub fn planner_value(&self) -> &'static str {
        if self.enable_planner { "1" } else { "0" }
    }

    /// Model identifier, with the empty string standing in for "unset".
    ///
    /// The key must always be bound so handlers can tell "disabled" apart
    /// from "misconfigured"; omission is never the sentinel.
    pub fn model_id_value(&self) -> String {
        self.model_id.clone().unwrap_or_default()
    }
}

/// A flag-derived environment value, named at declaration time and
/// resolved against a [`FlagContext`] during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagValue {
    PlannerEnabled,
    ModelId,
}

impl FlagValue {
    /// Resolve to the string handed to the unit's environment.
    pub fn resolve(&self, flags: &FlagContext) -> String {
        match self {
            FlagValue::PlannerEnabled => flags.planner_value().to_string(),
            FlagValue::ModelId => flags.model_id_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_value_maps_bool() {
        let mut flags = FlagContext::default();
        assert_eq!(flags.planner_value(), "0");
        flags.enable_planner = true;
        assert_eq!(flags.planner_value(), "1");
    }

    #[test]
    fn model_id_defaults_to_sentinel() {
        let flags = FlagContext::default();
        assert_eq!(flags.model_id_value(), "");

        let flags = FlagContext {
            enable_planner: true,
            model_id: Some("m1".to_string()),
        };
        assert_eq!(flags.model_id_value(), "m1");
    }

    #[test]
    fn flag_values_resolve_against_context() {
        let flags = FlagContext {
            enable_planner: true,
            model_id: None,
        };
        assert_eq!(FlagValue::PlannerEnabled.resolve(&flags), "1");
        assert_eq!(FlagValue::ModelId.resolve(&flags), "");
    }

    #[test]
    fn deserializes_with_defaults() {
        let flags: FlagContext = toml_like_json("{}");
        assert!(!flags.enable_planner);
        assert_eq!(flags.model_id, None);

        let flags: FlagContext =
            toml_like_json(r#"{"enable-planner": true, "model-id": "m1"}"#);
        assert!(flags.enable_planner);
        assert_eq!(flags.model_id.as_deref(), Some("m1"));
    }

    fn toml_like_json(s: &str) -> FlagContext {
        serde_json::from_str(s).unwrap()
    }
}
