//! The agentform platform topology.
//!
//! Declares the concrete deployment as one blueprint: the artifact bucket,
//! the state/runs/policies tables, the TTL-backed agent-core memory table,
//! the six compute units with their exact environment bindings, the fixed
//! access matrix, the planner-guarded model invocation, and the agent-core
//! HTTP front door.

use std::collections::BTreeMap;

use agentform_model::{
    Blueprint, BucketSpec, Capability, CodeRef, ConditionalPermission, EnvValue, FlagGuard,
    FlagValue, GrantDecl, HttpApiDecl, ResourceDecl, RouteDecl, TableSpec, UnitDecl,
};

use crate::config::StackConfig;

// Logical resource ids.
pub const ARTIFACTS: &str = "artifacts";
pub const STATE_TABLE: &str = "state";
pub const RUNS_TABLE: &str = "runs";
pub const POLICIES_TABLE: &str = "policies";
pub const MEMORY_TABLE: &str = "agentcore_memory";

// Logical unit ids.
pub const SIMULATE: &str = "simulate";
pub const EXECUTE: &str = "execute";
pub const STATUS: &str = "status";
pub const AGENTCORE_HELLO: &str = "agentcore-hello";
pub const AGENTCORE_TOOLS: &str = "agentcore-tools";
pub const AGENTCORE_MEMORY: &str = "agentcore-memory";

// Environment keys, the handler-facing contract.
pub const ENV_ARTIFACT_BUCKET: &str = "ARTIFACT_BUCKET";
pub const ENV_STATE_TABLE: &str = "STATE_TABLE";
pub const ENV_RUNS_TABLE: &str = "RUNS_TABLE";
pub const ENV_POLICIES_TABLE: &str = "POLICIES_TABLE";
pub const ENV_FIXTURE_NAME: &str = "FIXTURE_NAME";
pub const ENV_ENABLE_PLANNER: &str = "ENABLE_BEDROCK_PLANNER";
pub const ENV_MODEL_ID: &str = "BEDROCK_MODEL_ID";
pub const ENV_MEMORY_ENABLED: &str = "ENABLE_AGENTCORE_MEMORY";
pub const ENV_MEMORY_BACKEND: &str = "AGENTCORE_MEMORY_BACKEND";
pub const ENV_MEMORY_TABLE: &str = "AGENTCORE_MEMORY_TABLE";
pub const ENV_MEMORY_TTL: &str = "AGENTCORE_MEMORY_TTL_SECONDS";

/// Seconds a memory record lives before the store expires it.
const MEMORY_TTL_SECONDS: &str = "86400";

/// The fixed access matrix: which unit may read/write which store.
///
/// Anything absent from a unit's row is an over-grant. The realized grant
/// set must equal this table exactly; tests hold it to that.
pub const ACCESS_MATRIX: &[(&str, &str, Capability)] = &[
    (SIMULATE, ARTIFACTS, Capability::ReadWrite),
    (SIMULATE, STATE_TABLE, Capability::ReadWrite),
    (SIMULATE, RUNS_TABLE, Capability::ReadWrite),
    (SIMULATE, POLICIES_TABLE, Capability::ReadWrite),
    (EXECUTE, ARTIFACTS, Capability::ReadWrite),
    (EXECUTE, STATE_TABLE, Capability::ReadWrite),
    (EXECUTE, RUNS_TABLE, Capability::ReadWrite),
    (STATUS, ARTIFACTS, Capability::ReadWrite),
    (STATUS, RUNS_TABLE, Capability::ReadWrite),
    (AGENTCORE_HELLO, ARTIFACTS, Capability::ReadWrite),
    (AGENTCORE_TOOLS, ARTIFACTS, Capability::ReadWrite),
    (AGENTCORE_MEMORY, ARTIFACTS, Capability::ReadWrite),
    (AGENTCORE_MEMORY, MEMORY_TABLE, Capability::ReadWrite),
];

/// Build the platform blueprint from configuration and a staged bundle.
///
/// Pure: flags are resolved later, during evaluation, and nothing here
/// reads ambient state.
pub fn blueprint(config: &StackConfig, code: CodeRef) -> Blueprint {
    let mut bp = Blueprint::new(&config.namespace);

    bp.resources = vec![
        ResourceDecl::bucket(ARTIFACTS, BucketSpec::hardened()),
        ResourceDecl::table(STATE_TABLE, TableSpec::keyed("state_id")),
        ResourceDecl::table(RUNS_TABLE, TableSpec::keyed("run_id")),
        ResourceDecl::table(POLICIES_TABLE, TableSpec::keyed("policy_id")),
        ResourceDecl::table(
            MEMORY_TABLE,
            TableSpec::keyed("pk")
                .with_sort_key("sk")
                .with_ttl_attribute("expires_at"),
        ),
    ];

    bp.units = units(config, &code);

    bp.grants = ACCESS_MATRIX
        .iter()
        .map(|(unit, resource, capability)| GrantDecl {
            unit: (*unit).to_string(),
            resource: (*resource).to_string(),
            capability: *capability,
        })
        .collect();

    // Broad scope: the concrete model is chosen at run time through the
    // same flag mechanism, so the edge cannot name one.
    bp.conditional_permissions = vec![ConditionalPermission {
        unit: SIMULATE.to_string(),
        action: "bedrock:InvokeModel".to_string(),
        resource_scope: "*".to_string(),
        guard: FlagGuard::PlannerEnabled,
    }];

    bp.apis = vec![HttpApiDecl {
        id: "agentcore".to_string(),
        routes: vec![
            RouteDecl::post("/agentcore/base", AGENTCORE_HELLO),
            RouteDecl::post("/agentcore/tools", AGENTCORE_TOOLS),
            RouteDecl::post("/agentcore/memory", AGENTCORE_MEMORY),
        ],
    }];

    bp
}

fn units(config: &StackConfig, code: &CodeRef) -> Vec<UnitDecl> {
    // simulate/execute/status share the run-loop environment and race
    // shared state, so they serialize at one invocation each.
    let run_loop_env = {
        let mut env = BTreeMap::new();
        env.insert(
            ENV_ARTIFACT_BUCKET.to_string(),
            EnvValue::ResourceName(ARTIFACTS.to_string()),
        );
        env.insert(
            ENV_STATE_TABLE.to_string(),
            EnvValue::ResourceName(STATE_TABLE.to_string()),
        );
        env.insert(
            ENV_RUNS_TABLE.to_string(),
            EnvValue::ResourceName(RUNS_TABLE.to_string()),
        );
        env.insert(
            ENV_POLICIES_TABLE.to_string(),
            EnvValue::ResourceName(POLICIES_TABLE.to_string()),
        );
        env.insert(
            ENV_FIXTURE_NAME.to_string(),
            EnvValue::Literal(config.fixture.clone()),
        );
        env.insert(
            ENV_ENABLE_PLANNER.to_string(),
            EnvValue::Flag(FlagValue::PlannerEnabled),
        );
        env.insert(ENV_MODEL_ID.to_string(), EnvValue::Flag(FlagValue::ModelId));
        env
    };

    let mut hello_env = BTreeMap::new();
    hello_env.insert(
        ENV_ARTIFACT_BUCKET.to_string(),
        EnvValue::ResourceName(ARTIFACTS.to_string()),
    );

    let mut tools_env = BTreeMap::new();
    tools_env.insert(
        ENV_ARTIFACT_BUCKET.to_string(),
        EnvValue::ResourceName(ARTIFACTS.to_string()),
    );
    tools_env.insert(
        ENV_FIXTURE_NAME.to_string(),
        EnvValue::Literal(config.fixture.clone()),
    );

    let mut memory_env = BTreeMap::new();
    memory_env.insert(
        ENV_ARTIFACT_BUCKET.to_string(),
        EnvValue::ResourceName(ARTIFACTS.to_string()),
    );
    memory_env.insert(
        ENV_MEMORY_ENABLED.to_string(),
        EnvValue::Literal("1".to_string()),
    );
    memory_env.insert(
        ENV_MEMORY_BACKEND.to_string(),
        EnvValue::Literal("dynamodb".to_string()),
    );
    memory_env.insert(
        ENV_MEMORY_TABLE.to_string(),
        EnvValue::ResourceName(MEMORY_TABLE.to_string()),
    );
    memory_env.insert(
        ENV_MEMORY_TTL.to_string(),
        EnvValue::Literal(MEMORY_TTL_SECONDS.to_string()),
    );

    vec![
        unit(SIMULATE, code, 30, 1, run_loop_env.clone()),
        unit(EXECUTE, code, 30, 1, run_loop_env.clone()),
        unit(STATUS, code, 30, 1, run_loop_env),
        unit(AGENTCORE_HELLO, code, 10, 2, hello_env),
        unit(AGENTCORE_TOOLS, code, 30, 2, tools_env),
        unit(AGENTCORE_MEMORY, code, 15, 2, memory_env),
    ]
}

fn unit(
    id: &str,
    code: &CodeRef,
    timeout_secs: u32,
    concurrency_limit: u32,
    environment: BTreeMap<String, EnvValue>,
) -> UnitDecl {
    UnitDecl {
        id: id.to_string(),
        entry_point: format!("handlers.{}.handle", id.replace('-', "_")),
        code: code.clone(),
        timeout_secs,
        concurrency_limit,
        environment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_blueprint() -> Blueprint {
        blueprint(&StackConfig::default(), CodeRef::unstaged("services/"))
    }

    #[test]
    fn declares_five_resources_six_units() {
        let bp = test_blueprint();
        assert_eq!(bp.resources.len(), 5);
        assert_eq!(bp.units.len(), 6);
    }

    #[test]
    fn grants_mirror_the_access_matrix() {
        let bp = test_blueprint();
        assert_eq!(bp.grants.len(), ACCESS_MATRIX.len());
        for ((unit, resource, capability), grant) in ACCESS_MATRIX.iter().zip(&bp.grants) {
            assert_eq!(grant.unit, *unit);
            assert_eq!(grant.resource, *resource);
            assert_eq!(grant.capability, *capability);
        }
    }

    #[test]
    fn serialized_trio_is_capped_at_one() {
        let bp = test_blueprint();
        for id in [SIMULATE, EXECUTE, STATUS] {
            let unit = bp.units.iter().find(|u| u.id == id).unwrap();
            assert_eq!(unit.concurrency_limit, 1, "{id}");
        }
        for id in [AGENTCORE_HELLO, AGENTCORE_TOOLS, AGENTCORE_MEMORY] {
            let unit = bp.units.iter().find(|u| u.id == id).unwrap();
            assert_eq!(unit.concurrency_limit, 2, "{id}");
        }
    }

    #[test]
    fn memory_table_carries_sort_key_and_ttl() {
        let bp = test_blueprint();
        let decl = bp.resources.iter().find(|r| r.id == MEMORY_TABLE).unwrap();
        match &decl.spec {
            agentform_model::StorageSpec::Table(table) => {
                assert_eq!(table.partition_key.name, "pk");
                assert_eq!(table.sort_key.as_ref().unwrap().name, "sk");
                assert_eq!(table.ttl_attribute.as_deref(), Some("expires_at"));
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn fixture_is_forwarded_from_config() {
        let config = StackConfig {
            fixture: "alt_path.json".to_string(),
            ..StackConfig::default()
        };
        let bp = blueprint(&config, CodeRef::unstaged("services/"));
        let simulate = bp.units.iter().find(|u| u.id == SIMULATE).unwrap();
        assert_eq!(
            simulate.environment[ENV_FIXTURE_NAME],
            EnvValue::Literal("alt_path.json".to_string())
        );
    }
}
