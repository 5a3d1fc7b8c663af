//! Output projection over resolved identities.

use std::collections::BTreeMap;

use crate::compute::ResolvedUnit;
use crate::resource::ResolvedResource;
use crate::route::ResolvedApi;

/// Project resolved identities into a flat key-to-value map.
///
/// A pure read of already-resolved state: `resource.<id>.name`,
/// `unit.<id>.name`, `api.<id>.name` and `api.<id>.endpoint`. Keys are
/// dotted and sort deterministically; nothing is re-resolved or mutated.
pub fn project(
    resources: &[ResolvedResource],
    units: &[ResolvedUnit],
    apis: &[ResolvedApi],
) -> BTreeMap<String, String> {
    let mut outputs = BTreeMap::new();
    for resource in resources {
        outputs.insert(
            format!("resource.{}.name", resource.id),
            resource.name.clone(),
        );
    }
    for unit in units {
        outputs.insert(format!("unit.{}.name", unit.id), unit.name.clone());
    }
    for api in apis {
        outputs.insert(format!("api.{}.name", api.id), api.name.clone());
        outputs.insert(format!("api.{}.endpoint", api.id), api.endpoint.clone());
    }
    outputs
}
