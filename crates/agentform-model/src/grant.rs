//! Capability grants and flag-guarded permissions.
//!
//! Grants are directed edges from compute units to storage resources.
//! They are additive only: evaluation accumulates edges and never narrows
//! access granted earlier in the same pass. A guarded permission is an
//! explicit optional edge whose guard is read once, at evaluation time;
//! re-evaluating with the guard off yields a graph without the edge.

use serde::{Deserialize, Serialize};

/// Access level a unit holds on a storage resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ReadOnly,
    ReadWrite,
}

/// A declared capability edge from a unit to a resource, by logical ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDecl {
    pub unit: String,
    pub resource: String,
    pub capability: Capability,
}

impl GrantDecl {
    pub fn read_write(unit: &str, resource: &str) -> Self {
        Self {
            unit: unit.to_string(),
            resource: resource.to_string(),
            capability: Capability::ReadWrite,
        }
    }

    pub fn read_only(unit: &str, resource: &str) -> Self {
        Self {
            unit: unit.to_string(),
            resource: resource.to_string(),
            capability: Capability::ReadOnly,
        }
    }
}

/// Guard flag for a conditional permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagGuard {
    PlannerEnabled,
}

/// An extra permission that exists only while its guard flag is true.
///
/// The scope is deliberately broad when the concrete target is chosen at
/// run time through the same flag mechanism (e.g. a model identifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalPermission {
    pub unit: String,
    /// Provider action string, e.g. `bedrock:InvokeModel`.
    pub action: String,
    /// Resource scope the action applies to (`*` = any).
    pub resource_scope: String,
    pub guard: FlagGuard,
}

/// A capability edge with both endpoints verified against realized state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGrant {
    pub unit: String,
    pub resource: String,
    pub capability: Capability,
}

/// A guarded permission whose guard evaluated true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermission {
    pub unit: String,
    pub action: String,
    pub resource_scope: String,
}
