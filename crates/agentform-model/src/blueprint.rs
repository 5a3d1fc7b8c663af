//! The declaration container evaluated into a manifest.

use serde::{Deserialize, Serialize};

use crate::compute::UnitDecl;
use crate::grant::{ConditionalPermission, GrantDecl};
use crate::resource::ResourceDecl;
use crate::route::HttpApiDecl;

/// Pure declaration of a deployment topology.
///
/// A blueprint holds declarations only. Nothing is validated or resolved
/// until [`evaluate`](crate::eval::evaluate) walks the build plan, and the
/// blueprint itself is never mutated by evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Deployment-scoped namespace qualifying every realized identity.
    pub namespace: String,
    pub resources: Vec<ResourceDecl>,
    pub units: Vec<UnitDecl>,
    pub grants: Vec<GrantDecl>,
    pub conditional_permissions: Vec<ConditionalPermission>,
    pub apis: Vec<HttpApiDecl>,
}

impl Blueprint {
    /// An empty blueprint for the given namespace.
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            resources: Vec::new(),
            units: Vec::new(),
            grants: Vec::new(),
            conditional_permissions: Vec::new(),
            apis: Vec::new(),
        }
    }
}
