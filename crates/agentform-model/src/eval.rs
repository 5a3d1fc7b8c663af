//! Blueprint evaluation: the build plan and the resolved manifest.
//!
//! Evaluation is a single synchronous pass over a fixed dependency order:
//! resources, then compute units, then grants, then routes, then outputs.
//! The pass either resolves the whole blueprint or fails atomically with
//! the first error; a partial manifest is never returned.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blueprint::Blueprint;
use crate::compute::{EnvValue, ResolvedUnit};
use crate::error::{ModelError, ModelResult};
use crate::flags::FlagContext;
use crate::grant::{FlagGuard, ResolvedGrant, ResolvedPermission};
use crate::output;
use crate::resource::ResolvedResource;
use crate::route::{HttpMethod, ResolvedApi, ResolvedRoute};

/// One step of the build plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Resources,
    Units,
    Grants,
    Routes,
    Outputs,
}

/// The fixed dependency order evaluation walks.
///
/// Resources have no dependencies; units consume resolved resource names;
/// grants reference realized units and resources; routes must not exist
/// unless their target unit resolved; outputs read everything.
pub const BUILD_PLAN: [Phase; 5] = [
    Phase::Resources,
    Phase::Units,
    Phase::Grants,
    Phase::Routes,
    Phase::Outputs,
];

/// The fully resolved deployment model handed to the provisioning engine.
///
/// Immutable once produced; a later deployment re-evaluates the blueprint
/// from scratch and the engine diffs against previously realized state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub namespace: String,
    pub resources: Vec<ResolvedResource>,
    pub units: Vec<ResolvedUnit>,
    pub grants: Vec<ResolvedGrant>,
    pub permissions: Vec<ResolvedPermission>,
    pub apis: Vec<ResolvedApi>,
    pub outputs: BTreeMap<String, String>,
}

/// Evaluate a blueprint against a flag context.
///
/// Pure in its inputs: the same blueprint and flags always produce the
/// same manifest, byte for byte once serialized.
pub fn evaluate(blueprint: &Blueprint, flags: &FlagContext) -> ModelResult<Manifest> {
    let mut resources: Vec<ResolvedResource> = Vec::new();
    let mut units: Vec<ResolvedUnit> = Vec::new();
    let mut grants: Vec<ResolvedGrant> = Vec::new();
    let mut permissions: Vec<ResolvedPermission> = Vec::new();
    let mut apis: Vec<ResolvedApi> = Vec::new();
    let mut outputs: BTreeMap<String, String> = BTreeMap::new();

    for phase in BUILD_PLAN {
        match phase {
            Phase::Resources => resources = resolve_resources(blueprint)?,
            Phase::Units => units = resolve_units(blueprint, &resources, flags)?,
            Phase::Grants => {
                (grants, permissions) = resolve_grants(blueprint, &resources, &units, flags)?;
            }
            Phase::Routes => apis = resolve_routes(blueprint, &units)?,
            Phase::Outputs => outputs = output::project(&resources, &units, &apis),
        }
    }

    Ok(Manifest {
        namespace: blueprint.namespace.clone(),
        resources,
        units,
        grants,
        permissions,
        apis,
        outputs,
    })
}

fn resolve_resources(blueprint: &Blueprint) -> ModelResult<Vec<ResolvedResource>> {
    let mut ids: HashSet<&str> = HashSet::new();
    let mut names: HashSet<String> = HashSet::new();
    let mut resolved = Vec::with_capacity(blueprint.resources.len());

    for decl in &blueprint.resources {
        if !ids.insert(decl.id.as_str()) {
            return Err(ModelError::DuplicateResource(decl.id.clone()));
        }
        let name = decl.qualified_name(&blueprint.namespace);
        if !names.insert(name.clone()) {
            return Err(ModelError::DuplicateResource(name));
        }
        debug!(resource = %name, "declared storage resource");
        resolved.push(ResolvedResource {
            id: decl.id.clone(),
            name,
            removal: decl.removal,
            spec: decl.spec.clone(),
        });
    }

    Ok(resolved)
}

fn resolve_units(
    blueprint: &Blueprint,
    resources: &[ResolvedResource],
    flags: &FlagContext,
) -> ModelResult<Vec<ResolvedUnit>> {
    let resource_names: HashMap<&str, &str> = resources
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect();

    let mut ids: HashSet<&str> = HashSet::new();
    let mut resolved = Vec::with_capacity(blueprint.units.len());

    for decl in &blueprint.units {
        if !ids.insert(decl.id.as_str()) {
            return Err(ModelError::DuplicateUnit(decl.id.clone()));
        }

        let mut environment = BTreeMap::new();
        for (key, value) in &decl.environment {
            let bound = match value {
                EnvValue::Literal(literal) => literal.clone(),
                EnvValue::ResourceName(resource) => resource_names
                    .get(resource.as_str())
                    .ok_or_else(|| ModelError::UnknownResource {
                        referrer: format!("{}.env.{key}", decl.id),
                        resource: resource.clone(),
                    })?
                    .to_string(),
                EnvValue::Flag(flag) => flag.resolve(flags),
            };
            environment.insert(key.clone(), bound);
        }

        let name = decl.qualified_name(&blueprint.namespace);
        debug!(unit = %name, env_keys = environment.len(), "resolved compute unit");
        resolved.push(ResolvedUnit {
            id: decl.id.clone(),
            name,
            entry_point: decl.entry_point.clone(),
            code: decl.code.clone(),
            timeout_secs: decl.timeout_secs,
            concurrency_limit: decl.concurrency_limit,
            environment,
        });
    }

    Ok(resolved)
}

fn resolve_grants(
    blueprint: &Blueprint,
    resources: &[ResolvedResource],
    units: &[ResolvedUnit],
    flags: &FlagContext,
) -> ModelResult<(Vec<ResolvedGrant>, Vec<ResolvedPermission>)> {
    let resource_ids: HashSet<&str> = resources.iter().map(|r| r.id.as_str()).collect();
    let unit_ids: HashSet<&str> = units.iter().map(|u| u.id.as_str()).collect();

    let mut grants = Vec::with_capacity(blueprint.grants.len());
    for grant in &blueprint.grants {
        if !unit_ids.contains(grant.unit.as_str()) {
            return Err(ModelError::UnknownUnit {
                referrer: format!("grant on {}", grant.resource),
                unit: grant.unit.clone(),
            });
        }
        if !resource_ids.contains(grant.resource.as_str()) {
            return Err(ModelError::UnknownResource {
                referrer: format!("grant from {}", grant.unit),
                resource: grant.resource.clone(),
            });
        }
        grants.push(ResolvedGrant {
            unit: grant.unit.clone(),
            resource: grant.resource.clone(),
            capability: grant.capability,
        });
    }

    let mut permissions = Vec::new();
    for permission in &blueprint.conditional_permissions {
        if !unit_ids.contains(permission.unit.as_str()) {
            return Err(ModelError::UnknownUnit {
                referrer: format!("conditional permission {}", permission.action),
                unit: permission.unit.clone(),
            });
        }
        let enabled = match permission.guard {
            FlagGuard::PlannerEnabled => flags.enable_planner,
        };
        if enabled {
            debug!(
                unit = %permission.unit,
                action = %permission.action,
                "guarded permission enabled"
            );
            permissions.push(ResolvedPermission {
                unit: permission.unit.clone(),
                action: permission.action.clone(),
                resource_scope: permission.resource_scope.clone(),
            });
        }
    }

    Ok((grants, permissions))
}

fn resolve_routes(blueprint: &Blueprint, units: &[ResolvedUnit]) -> ModelResult<Vec<ResolvedApi>> {
    let unit_ids: HashSet<&str> = units.iter().map(|u| u.id.as_str()).collect();

    let mut apis = Vec::with_capacity(blueprint.apis.len());
    for api in &blueprint.apis {
        let mut seen: HashSet<(HttpMethod, &str)> = HashSet::new();
        let mut routes = Vec::with_capacity(api.routes.len());

        for route in &api.routes {
            if !unit_ids.contains(route.target.as_str()) {
                return Err(ModelError::UnknownUnit {
                    referrer: format!("route {} {}", route.method.as_str(), route.path),
                    unit: route.target.clone(),
                });
            }
            if !seen.insert((route.method, route.path.as_str())) {
                return Err(ModelError::DuplicateRoute {
                    method: route.method.as_str().to_string(),
                    path: route.path.clone(),
                });
            }
            routes.push(ResolvedRoute {
                path: route.path.clone(),
                method: route.method,
                target: route.target.clone(),
            });
        }

        let name = api.qualified_name(&blueprint.namespace);
        let endpoint = format!("${{{name}.endpoint}}");
        debug!(api = %name, routes = routes.len(), "realized http front door");
        apis.push(ResolvedApi {
            id: api.id.clone(),
            name,
            endpoint,
            routes,
        });
    }

    Ok(apis)
}
